//! Repository for the `naming_metadata` table.

use mkvmender_core::types::DbId;
use sqlx::PgPool;

use crate::models::metadata::{CreateMetadata, NamingMetadata};

/// Column list for `naming_metadata` queries.
const COLUMNS: &str = "\
    id, submission_id, title, year, season, episode, quality, source, created_at";

pub struct MetadataRepo;

impl MetadataRepo {
    /// Attach metadata to a submission. Fails with
    /// `uq_naming_metadata_submission` if it already has some.
    pub async fn create(
        pool: &PgPool,
        submission_id: DbId,
        input: &CreateMetadata,
    ) -> Result<NamingMetadata, sqlx::Error> {
        let query = format!(
            "INSERT INTO naming_metadata \
                (submission_id, title, year, season, episode, quality, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NamingMetadata>(&query)
            .bind(submission_id)
            .bind(&input.title)
            .bind(input.year)
            .bind(input.season)
            .bind(input.episode)
            .bind(&input.quality)
            .bind(&input.source)
            .fetch_one(pool)
            .await
    }

    /// Find the metadata attached to a submission.
    pub async fn find_by_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Option<NamingMetadata>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM naming_metadata WHERE submission_id = $1");
        sqlx::query_as::<_, NamingMetadata>(&query)
            .bind(submission_id)
            .fetch_optional(pool)
            .await
    }

    /// List metadata for any of the given submissions.
    pub async fn list_by_submissions(
        pool: &PgPool,
        submission_ids: &[DbId],
    ) -> Result<Vec<NamingMetadata>, sqlx::Error> {
        if submission_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM naming_metadata WHERE submission_id = ANY($1)");
        sqlx::query_as::<_, NamingMetadata>(&query)
            .bind(submission_ids)
            .fetch_all(pool)
            .await
    }
}
