//! Ordering rules for naming submissions and title search results.
//!
//! The store only filters and fetches; every ranking and tie-break decision
//! lives here so that lookups, vote displays, batch previews and search all
//! agree on what "best match first" means.

use std::cmp::Ordering;

use crate::media::SortStrategy;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Submission standing
// ---------------------------------------------------------------------------

/// Anything that can be ranked as a naming submission.
pub trait Standing {
    fn id(&self) -> DbId;
    fn vote_score(&self) -> i64;
    fn created_at(&self) -> Timestamp;
}

/// Best-first comparison: higher score, then newer, then higher id.
///
/// The trailing id comparison only matters for rows created within the same
/// timestamp and keeps the order total.
pub fn compare_standing<T: Standing>(a: &T, b: &T) -> Ordering {
    b.vote_score()
        .cmp(&a.vote_score())
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| b.id().cmp(&a.id()))
}

/// Sort submissions best-first in place.
pub fn order_by_standing<T: Standing>(items: &mut [T]) {
    items.sort_by(compare_standing);
}

/// The submission that [`order_by_standing`] would put first.
pub fn best_submission<T: Standing>(items: &[T]) -> Option<&T> {
    items.iter().min_by(|a, b| compare_standing(*a, *b))
}

/// Highest vote score in the list; an empty list counts as `0`.
///
/// The maximum is taken over the scores alone, not floored at `0`, so a
/// result whose namings are all negative ranks below one with no namings.
pub fn max_vote_score<T: Standing>(items: &[T]) -> i64 {
    items.iter().map(Standing::vote_score).max().unwrap_or(0)
}

/// Creation time of the most recent submission, if any.
pub fn newest_submission<T: Standing>(items: &[T]) -> Option<Timestamp> {
    items.iter().map(Standing::created_at).max()
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A title search row as seen by the sort strategies.
pub trait RankedResult {
    type Submission: Standing;

    fn title(&self) -> &str;
    fn year(&self) -> Option<i32>;
    fn fingerprint(&self) -> &str;
    fn match_score(&self) -> i64;
    fn submissions(&self) -> &[Self::Submission];
}

/// Known years newest first; absent years after every known year.
pub fn compare_years_desc(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort search results in place according to `strategy`.
///
/// | Strategy    | Primary key                         | Tie-break          |
/// |-------------|-------------------------------------|--------------------|
/// | `relevance` | match score, descending             | title ascending    |
/// | `votes`     | best submission score, descending   | title ascending    |
/// | `date`      | newest submission, descending       | fingerprint asc    |
/// | `title`     | title ascending                     | year descending    |
///
/// The sort is stable, so rows that compare equal keep their input order.
pub fn sort_results<R: RankedResult>(results: &mut [R], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Relevance => results.sort_by(|a, b| {
            b.match_score()
                .cmp(&a.match_score())
                .then_with(|| a.title().cmp(b.title()))
        }),
        SortStrategy::Votes => results.sort_by(|a, b| {
            max_vote_score(b.submissions())
                .cmp(&max_vote_score(a.submissions()))
                .then_with(|| a.title().cmp(b.title()))
        }),
        SortStrategy::Date => results.sort_by(|a, b| {
            newest_submission(b.submissions())
                .cmp(&newest_submission(a.submissions()))
                .then_with(|| a.fingerprint().cmp(b.fingerprint()))
        }),
        SortStrategy::Title => results.sort_by(|a, b| {
            a.title()
                .cmp(b.title())
                .then_with(|| compare_years_desc(a.year(), b.year()))
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
