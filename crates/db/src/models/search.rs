//! Rows read by title search.

use serde::Serialize;
use sqlx::FromRow;

/// One submission's metadata joined with its fingerprint.
///
/// Search collapses these into one result per
/// `(hash, year, season, episode)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TitleRow {
    pub title: String,
    pub year: Option<i32>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub hash: String,
    pub file_size: i64,
    pub media_type: String,
}
