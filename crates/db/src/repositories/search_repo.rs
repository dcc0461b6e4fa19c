//! Read-only queries backing title search.

use sqlx::PgPool;

use crate::models::search::TitleRow;

pub struct SearchRepo;

impl SearchRepo {
    /// Every distinct non-empty metadata title. This is the candidate
    /// universe the matcher scores against.
    pub async fn distinct_titles(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT title FROM naming_metadata \
             WHERE title IS NOT NULL AND title <> '' \
             ORDER BY title",
        )
        .fetch_all(pool)
        .await
    }

    /// Metadata rows whose title is exactly one of `titles`, joined with
    /// the fingerprint they describe.
    ///
    /// Ordered by title, year descending, season, episode. The first row per
    /// `(hash, year, season, episode)` is therefore stable across calls.
    pub async fn rows_for_titles(
        pool: &PgPool,
        titles: &[String],
    ) -> Result<Vec<TitleRow>, sqlx::Error> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, TitleRow>(
            "SELECT nm.title, nm.year, nm.season, nm.episode, \
                    fh.hash, fh.file_size, fh.media_type \
             FROM naming_metadata nm \
             JOIN naming_submissions ns ON ns.id = nm.submission_id \
             JOIN file_hashes fh ON fh.id = ns.hash_id \
             WHERE nm.title = ANY($1) \
             ORDER BY nm.title, nm.year DESC NULLS LAST, nm.season NULLS LAST, \
                      nm.episode NULLS LAST, fh.hash, ns.id",
        )
        .bind(titles)
        .fetch_all(pool)
        .await
    }
}
