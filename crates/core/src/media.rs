//! Media kind, vote direction, and search sort strategy value types.
//!
//! These are stored as plain `TEXT` / `SMALLINT` columns, so each type has a
//! string or integer form plus a validating parser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Media kind
// ---------------------------------------------------------------------------

pub const MEDIA_KIND_MOVIE: &str = "movie";
pub const MEDIA_KIND_TV: &str = "tv";

/// Accepted spelling for episodic content coming from older clients.
const MEDIA_KIND_TV_EPISODE_ALIAS: &str = "tv_episode";

/// Coarse classification of a file's content.
///
/// Declaration order is the display order used as the last grouping
/// tie-break (movies before TV).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(alias = "tv_episode")]
    Tv,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => MEDIA_KIND_MOVIE,
            MediaKind::Tv => MEDIA_KIND_TV,
        }
    }

    /// Parse the stored / submitted form. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            MEDIA_KIND_MOVIE => Ok(MediaKind::Movie),
            MEDIA_KIND_TV | MEDIA_KIND_TV_EPISODE_ALIAS => Ok(MediaKind::Tv),
            other => Err(CoreError::Validation(format!(
                "Unknown media kind '{other}'. Must be one of: {MEDIA_KIND_MOVIE}, {MEDIA_KIND_TV}"
            ))),
        }
    }

    pub fn is_episodic(self) -> bool {
        self == MediaKind::Tv
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Vote direction
// ---------------------------------------------------------------------------

/// A single author's endorsement (`+1`) or rejection (`-1`) of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn value(self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    pub fn from_value(value: i16) -> Result<Self, CoreError> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            other => Err(CoreError::Validation(format!(
                "Invalid vote direction {other}. Must be 1 or -1"
            ))),
        }
    }
}

impl From<VoteDirection> for i16 {
    fn from(direction: VoteDirection) -> Self {
        direction.value()
    }
}

impl TryFrom<i16> for VoteDirection {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        VoteDirection::from_value(value)
    }
}

// ---------------------------------------------------------------------------
// Sort strategy
// ---------------------------------------------------------------------------

/// Ordering applied to title search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Match score, best first.
    #[default]
    Relevance,
    /// Best submission score, highest first.
    Votes,
    /// Newest submission, most recent first.
    Date,
    /// Alphabetical by title.
    Title,
}

impl SortStrategy {
    /// Parse a sort parameter. Unknown or empty values fall back to
    /// [`SortStrategy::Relevance`] instead of failing.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "votes" => SortStrategy::Votes,
            "date" => SortStrategy::Date,
            "title" => SortStrategy::Title,
            _ => SortStrategy::Relevance,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortStrategy::Relevance => "relevance",
            SortStrategy::Votes => "votes",
            SortStrategy::Date => "date",
            SortStrategy::Title => "title",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
