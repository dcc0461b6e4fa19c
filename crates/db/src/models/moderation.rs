//! Moderation audit log and admin reporting models.

use mkvmender_core::moderation::AdminSort;
use mkvmender_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::submission::SubmissionWithVotes;

/// A row from the `moderation_actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModerationAction {
    pub id: DbId,
    pub admin_id: DbId,
    pub action_type: String,
    pub target_type: String,
    pub target_id: DbId,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a moderation action.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModerationAction {
    pub admin_id: DbId,
    pub action_type: String,
    pub target_type: String,
    pub target_id: DbId,
    pub reason: Option<String>,
}

/// Filters for the admin submission listing. Values are already clamped.
#[derive(Debug, Clone, Copy)]
pub struct AdminSubmissionQuery {
    pub page: i64,
    pub limit: i64,
    pub user_id: Option<DbId>,
    pub sort: AdminSort,
}

/// One page of the admin submission listing.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPage {
    pub items: Vec<SubmissionWithVotes>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub active_users: i64,
    pub total_hashes: i64,
    pub total_submissions: i64,
    pub total_votes: i64,
}
