//! Repository for the `votes` table.

use mkvmender_core::media::VoteDirection;
use mkvmender_core::types::DbId;
use sqlx::PgPool;

use crate::models::submission::VoteTally;
use crate::models::vote::Vote;

/// Column list for `votes` queries.
const COLUMNS: &str = "id, submission_id, user_id, vote_type, created_at, updated_at";

/// Provides the one-vote-per-author ledger.
pub struct VoteRepo;

impl VoteRepo {
    /// Record or change an author's vote on a submission.
    ///
    /// A single statement, so two concurrent casts by the same author can
    /// never produce two rows; the later write wins.
    pub async fn upsert(
        pool: &PgPool,
        submission_id: DbId,
        user_id: DbId,
        direction: VoteDirection,
    ) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (submission_id, user_id, vote_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (submission_id, user_id) \
             DO UPDATE SET vote_type = EXCLUDED.vote_type, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(submission_id)
            .bind(user_id)
            .bind(direction.value())
            .fetch_one(pool)
            .await
    }

    /// Find an author's vote on a submission.
    pub async fn find(
        pool: &PgPool,
        submission_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE submission_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(submission_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove an author's vote. Returns `false` if there was none.
    pub async fn delete(
        pool: &PgPool,
        submission_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM votes WHERE submission_id = $1 AND user_id = $2")
            .bind(submission_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Current counts for one submission. No votes yields all zeros.
    pub async fn tally(pool: &PgPool, submission_id: DbId) -> Result<VoteTally, sqlx::Error> {
        sqlx::query_as::<_, VoteTally>(
            "SELECT $1::BIGINT AS submission_id, \
                    COUNT(*) FILTER (WHERE vote_type = 1) AS upvotes, \
                    COUNT(*) FILTER (WHERE vote_type = -1) AS downvotes, \
                    COALESCE(SUM(vote_type), 0)::BIGINT AS score \
             FROM votes WHERE submission_id = $1",
        )
        .bind(submission_id)
        .fetch_one(pool)
        .await
    }
}
