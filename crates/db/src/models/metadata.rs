//! Structured metadata attached to a naming submission.

use mkvmender_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `naming_metadata` table. At most one per submission.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct NamingMetadata {
    pub id: DbId,
    pub submission_id: DbId,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub quality: Option<String>,
    pub source: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for the metadata half of a proposal. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreateMetadata {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub quality: Option<String>,
    pub source: Option<String>,
}

impl CreateMetadata {
    /// Whether any field is set. Empty metadata is not stored.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.season.is_none()
            && self.episode.is_none()
            && self.quality.is_none()
            && self.source.is_none()
    }
}
