//! Moderation constants and admin listing parameters.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Audit action constants
// ---------------------------------------------------------------------------

pub const ACTION_DELETE_SUBMISSION: &str = "delete_submission";
pub const TARGET_SUBMISSION: &str = "submission";

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default page size for admin submission listings.
pub const DEFAULT_ADMIN_PAGE_SIZE: i64 = 50;

/// Maximum page size for admin submission listings.
pub const MAX_ADMIN_PAGE_SIZE: i64 = 100;

/// Default number of moderation log entries returned.
pub const DEFAULT_MODERATION_LOG_LIMIT: i64 = 50;

/// Maximum number of moderation log entries returned.
pub const MAX_MODERATION_LOG_LIMIT: i64 = 500;

/// Clamp a 1-based page number; anything below 1 becomes 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size. Values outside `1..=max` fall back to `default`.
pub fn clamp_page_size(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(limit) if (1..=max).contains(&limit) => limit,
        _ => default,
    }
}

/// Row offset for a clamped page / page size pair.
///
/// Saturates at `i64::MAX`, which PostgreSQL accepts as an `OFFSET` past
/// every row.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

// ---------------------------------------------------------------------------
// Admin sort
// ---------------------------------------------------------------------------

/// Ordering of the admin submission listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSort {
    /// Newest first.
    #[default]
    Date,
    /// Highest score first, then newest.
    Votes,
    /// Metadata title ascending, then newest.
    Title,
}

impl AdminSort {
    /// Parse a sort parameter; unknown values fall back to [`AdminSort::Date`].
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "votes" => AdminSort::Votes,
            "title" => AdminSort::Title,
            _ => AdminSort::Date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_floors_at_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn out_of_range_page_size_uses_default() {
        assert_eq!(clamp_page_size(None, 50, 100), 50);
        assert_eq!(clamp_page_size(Some(0), 50, 100), 50);
        assert_eq!(clamp_page_size(Some(101), 50, 100), 50);
        assert_eq!(clamp_page_size(Some(100), 50, 100), 100);
        assert_eq!(clamp_page_size(Some(7), 50, 100), 7);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(page_offset(1, 50), 0);
        assert_eq!(page_offset(3, 20), 40);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let page = clamp_page(Some(i64::MAX));
        assert_eq!(page_offset(page, 50), i64::MAX);
        assert_eq!(page_offset(page, MAX_ADMIN_PAGE_SIZE), i64::MAX);
    }

    #[test]
    fn admin_sort_defaults_to_date() {
        assert_eq!(AdminSort::parse_or_default("votes"), AdminSort::Votes);
        assert_eq!(AdminSort::parse_or_default("TITLE"), AdminSort::Title);
        assert_eq!(AdminSort::parse_or_default("whatever"), AdminSort::Date);
    }
}
