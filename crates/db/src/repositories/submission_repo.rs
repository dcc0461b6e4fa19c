//! Repository for the `naming_submissions` table.
//!
//! Reads come back joined with the fingerprint, the author, and the vote
//! aggregate. Ordering for display is applied by the caller.

use mkvmender_core::moderation::{page_offset, AdminSort};
use mkvmender_core::types::DbId;
use sqlx::PgPool;

use crate::models::moderation::AdminSubmissionQuery;
use crate::models::submission::{CreateSubmission, NamingSubmission, SubmissionWithVotes};

/// Column list for plain `naming_submissions` queries.
const COLUMNS: &str = "id, hash_id, user_id, filename, created_at, updated_at";

/// Select list and joins shared by every [`SubmissionWithVotes`] read.
/// Must be followed by an optional `WHERE` and [`WITH_VOTES_GROUP_BY`].
const WITH_VOTES_SELECT: &str = "\
    SELECT ns.id, ns.hash_id, ns.user_id, ns.filename, ns.created_at, \
           fh.hash, fh.file_size, fh.media_type, u.username, \
           COALESCE(SUM(v.vote_type), 0)::BIGINT AS vote_score, \
           COUNT(v.id) FILTER (WHERE v.vote_type = 1) AS upvotes, \
           COUNT(v.id) FILTER (WHERE v.vote_type = -1) AS downvotes \
    FROM naming_submissions ns \
    JOIN file_hashes fh ON fh.id = ns.hash_id \
    JOIN users u ON u.id = ns.user_id \
    LEFT JOIN votes v ON v.submission_id = ns.id";

const WITH_VOTES_GROUP_BY: &str = "GROUP BY ns.id, fh.id, u.id";

/// Provides create, read, and delete for naming submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<NamingSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO naming_submissions (hash_id, user_id, filename) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NamingSubmission>(&query)
            .bind(input.hash_id)
            .bind(input.user_id)
            .bind(&input.filename)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NamingSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM naming_submissions WHERE id = $1");
        sqlx::query_as::<_, NamingSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a submission by its ID, with its vote counts.
    pub async fn find_with_votes(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmissionWithVotes>, sqlx::Error> {
        let query = format!("{WITH_VOTES_SELECT} WHERE ns.id = $1 {WITH_VOTES_GROUP_BY}");
        sqlx::query_as::<_, SubmissionWithVotes>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All submissions for one fingerprint, unordered beyond insertion id.
    pub async fn list_with_votes_by_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Vec<SubmissionWithVotes>, sqlx::Error> {
        let query = format!(
            "{WITH_VOTES_SELECT} WHERE fh.hash = $1 {WITH_VOTES_GROUP_BY} ORDER BY ns.id"
        );
        sqlx::query_as::<_, SubmissionWithVotes>(&query)
            .bind(hash)
            .fetch_all(pool)
            .await
    }

    /// All submissions for any of `hashes` in a single round trip.
    pub async fn list_with_votes_by_hashes(
        pool: &PgPool,
        hashes: &[String],
    ) -> Result<Vec<SubmissionWithVotes>, sqlx::Error> {
        if hashes.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "{WITH_VOTES_SELECT} WHERE fh.hash = ANY($1) {WITH_VOTES_GROUP_BY} ORDER BY ns.id"
        );
        sqlx::query_as::<_, SubmissionWithVotes>(&query)
            .bind(hashes)
            .fetch_all(pool)
            .await
    }

    /// Delete a submission. Metadata and votes cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM naming_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Admin listing
    // -----------------------------------------------------------------------

    /// One page of submissions, optionally restricted to one author.
    pub async fn admin_list(
        pool: &PgPool,
        params: &AdminSubmissionQuery,
    ) -> Result<Vec<SubmissionWithVotes>, sqlx::Error> {
        let order = match params.sort {
            AdminSort::Date => "ns.created_at DESC, ns.id DESC",
            AdminSort::Votes => "vote_score DESC, ns.created_at DESC, ns.id DESC",
            AdminSort::Title => "nm.title ASC NULLS LAST, ns.created_at DESC, ns.id DESC",
        };
        let query = format!(
            "{WITH_VOTES_SELECT} \
             LEFT JOIN naming_metadata nm ON nm.submission_id = ns.id \
             WHERE ($1::BIGINT IS NULL OR ns.user_id = $1) \
             {WITH_VOTES_GROUP_BY}, nm.id \
             ORDER BY {order} \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SubmissionWithVotes>(&query)
            .bind(params.user_id)
            .bind(params.limit)
            .bind(page_offset(params.page, params.limit))
            .fetch_all(pool)
            .await
    }

    /// Total rows matched by [`SubmissionRepo::admin_list`] before paging.
    pub async fn admin_count(pool: &PgPool, user_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM naming_submissions WHERE ($1::BIGINT IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
