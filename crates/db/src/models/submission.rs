//! Naming submission models.

use mkvmender_core::ranking::Standing;
use mkvmender_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::metadata::NamingMetadata;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `naming_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NamingSubmission {
    pub id: DbId,
    pub hash_id: DbId,
    pub user_id: DbId,
    pub filename: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A submission joined with its fingerprint, author, and vote aggregate.
///
/// `vote_score` is the sum of all vote values (`0` with no votes).
/// `metadata` is not selected by the join; callers attach it afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionWithVotes {
    pub id: DbId,
    pub hash_id: DbId,
    pub user_id: DbId,
    pub filename: String,
    pub created_at: Timestamp,
    pub hash: String,
    pub file_size: i64,
    pub media_type: String,
    pub username: String,
    pub vote_score: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NamingMetadata>,
}

impl Standing for SubmissionWithVotes {
    fn id(&self) -> DbId {
        self.id
    }

    fn vote_score(&self) -> i64 {
        self.vote_score
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Vote counts for a single submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct VoteTally {
    pub submission_id: DbId,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a submission row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    pub hash_id: DbId,
    pub user_id: DbId,
    pub filename: String,
}
