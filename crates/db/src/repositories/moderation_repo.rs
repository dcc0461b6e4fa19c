//! Repository for the `moderation_actions` table and admin counters.

use sqlx::PgPool;

use crate::models::moderation::{AdminStats, CreateModerationAction, ModerationAction};

/// Column list for `moderation_actions` queries.
const COLUMNS: &str = "id, admin_id, action_type, target_type, target_id, reason, created_at";

pub struct ModerationRepo;

impl ModerationRepo {
    /// Record a moderation action.
    pub async fn log_action(
        pool: &PgPool,
        input: &CreateModerationAction,
    ) -> Result<ModerationAction, sqlx::Error> {
        let query = format!(
            "INSERT INTO moderation_actions \
                (admin_id, action_type, target_type, target_id, reason) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ModerationAction>(&query)
            .bind(input.admin_id)
            .bind(&input.action_type)
            .bind(&input.target_type)
            .bind(input.target_id)
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    /// Most recent actions first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ModerationAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM moderation_actions \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ModerationAction>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Aggregate counts for the admin dashboard.
    pub async fn stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        sqlx::query_as::<_, AdminStats>(
            "SELECT \
                (SELECT COUNT(*) FROM users) AS total_users, \
                (SELECT COUNT(*) FROM users WHERE is_active) AS active_users, \
                (SELECT COUNT(*) FROM file_hashes) AS total_hashes, \
                (SELECT COUNT(*) FROM naming_submissions) AS total_submissions, \
                (SELECT COUNT(*) FROM votes) AS total_votes",
        )
        .fetch_one(pool)
        .await
    }
}
