//! Title matching and match scoring for title search.
//!
//! Two modes are supported:
//!
//! - **Exact**: case-insensitive substring containment. A match at the start
//!   of the title scores [`PREFIX_MATCH_SCORE`]; a match further in scores
//!   `INTERIOR_MATCH_BASE - index`, so later matches rank lower. The score is
//!   not floored and may go negative for very long titles.
//! - **Fuzzy**: the case-folded query must occur as an ordered subsequence of
//!   the case-folded title. The score starts from [`FUZZY_BASE_SCORE`] and
//!   subtracts the edit distance between query and title plus the number of
//!   gap characters inside the tightest window containing the subsequence.
//!   Closer and more contiguous matches therefore score higher.
//!
//! Higher scores are always better.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Score for an exact match that begins at the first character.
pub const PREFIX_MATCH_SCORE: i64 = 100;

/// Base score for exact matches that begin after the first character.
pub const INTERIOR_MATCH_BASE: i64 = 50;

/// Starting score for fuzzy matches before distance penalties.
pub const FUZZY_BASE_SCORE: i64 = 100;

/// A title from the candidate universe that matched a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleMatch {
    pub title: String,
    pub score: i64,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Match `query` against every title in `titles`.
///
/// Returns the matching titles with their scores, best first (ties broken
/// alphabetically). An empty or whitespace-only query matches nothing.
pub fn match_titles<S: AsRef<str>>(query: &str, titles: &[S], use_fuzzy: bool) -> Vec<TitleMatch> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<TitleMatch> = titles
        .iter()
        .filter_map(|title| {
            let title = title.as_ref();
            score_title(query, title, use_fuzzy).map(|score| TitleMatch {
                title: title.to_string(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.title.cmp(&b.title)));
    matches
}

/// Score a single title. `None` means the title does not match.
pub fn score_title(query: &str, title: &str, use_fuzzy: bool) -> Option<i64> {
    if use_fuzzy {
        fuzzy_score(query, title)
    } else {
        substring_score(query, title)
    }
}

/// Case-insensitive substring score (see module docs).
pub fn substring_score(query: &str, title: &str) -> Option<i64> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return None;
    }
    let title = title.to_lowercase();

    let byte_index = title.find(&query)?;
    // Index in characters, not bytes.
    let index = title[..byte_index].chars().count() as i64;

    if index == 0 {
        Some(PREFIX_MATCH_SCORE)
    } else {
        Some(INTERIOR_MATCH_BASE - index)
    }
}

/// Case-folded subsequence score (see module docs).
pub fn fuzzy_score(query: &str, title: &str) -> Option<i64> {
    let query = fold(query);
    if query.is_empty() {
        return None;
    }
    let title = fold(title);

    let window = tightest_window(&query, &title)?;
    let gaps = (window - query.len()) as i64;

    let query: String = query.into_iter().collect();
    let title: String = title.into_iter().collect();
    let distance = strsim::levenshtein(&query, &title) as i64;

    Some(FUZZY_BASE_SCORE - distance - gaps)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fold(value: &str) -> Vec<char> {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Length of the shortest slice of `title` that contains `query` as an
/// ordered subsequence, or `None` if `query` is not a subsequence at all.
fn tightest_window(query: &[char], title: &[char]) -> Option<usize> {
    let first = *query.first()?;
    let mut best: Option<usize> = None;

    for start in 0..title.len() {
        if title[start] != first {
            continue;
        }

        let mut matched = 0;
        let mut end = None;
        for (offset, c) in title[start..].iter().enumerate() {
            if *c == query[matched] {
                matched += 1;
                if matched == query.len() {
                    end = Some(start + offset);
                    break;
                }
            }
        }

        match end {
            Some(end) => {
                let width = end - start + 1;
                best = Some(best.map_or(width, |current| current.min(width)));
            }
            // No completion from here means no completion from any later start.
            None => break,
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
