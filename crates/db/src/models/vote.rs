//! Vote models.

use mkvmender_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `votes` table. `vote_type` is `1` or `-1`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub submission_id: DbId,
    pub user_id: DbId,
    pub vote_type: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
