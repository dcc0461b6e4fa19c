//! Content identity models.

use mkvmender_core::error::CoreError;
use mkvmender_core::media::MediaKind;
use mkvmender_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `file_hashes` table.
///
/// `media_type` is stored as text (`"movie"` or `"tv"`); use
/// [`FileHash::media_kind`] for the typed value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileHash {
    pub id: DbId,
    pub hash: String,
    pub file_size: i64,
    pub media_type: String,
    pub created_at: Timestamp,
}

impl FileHash {
    pub fn media_kind(&self) -> Result<MediaKind, CoreError> {
        MediaKind::parse(&self.media_type)
    }
}

/// DTO for registering a content identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFileHash {
    pub hash: String,
    pub file_size: i64,
    pub media_type: MediaKind,
}
