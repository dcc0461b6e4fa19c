//! Display-time folding of title search rows.
//!
//! Rows are grouped by the composite key `(title, year, media kind)`; TV
//! groups can be broken down further into seasons and episodes. Grouping
//! never reorders the members of a group, it only folds them.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::media::MediaKind;
use crate::ranking::compare_years_desc;

/// The fields grouping needs from a search row.
pub trait Groupable {
    fn title(&self) -> &str;
    fn year(&self) -> Option<i32>;
    fn media_kind(&self) -> MediaKind;
    fn season(&self) -> Option<i32>;
    fn episode(&self) -> Option<i32>;
}

/// Composite grouping key. A missing year is its own key, distinct from
/// every real year.
pub type GroupKey = (String, Option<i32>, MediaKind);

/// Search rows sharing title, year, and media kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleGroup<T> {
    pub title: String,
    pub year: Option<i32>,
    pub media_kind: MediaKind,
    pub results: Vec<T>,
}

impl<T> TitleGroup<T> {
    pub fn key(&self) -> GroupKey {
        (self.title.clone(), self.year, self.media_kind)
    }
}

/// A TV group broken down by season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonBreakdown<T> {
    /// Season number to episodes, seasons ascending.
    pub seasons: BTreeMap<i32, Vec<T>>,
    /// Rows without a season number.
    pub unassigned: Vec<T>,
}

impl<T> SeasonBreakdown<T> {
    pub fn season_numbers(&self) -> Vec<i32> {
        self.seasons.keys().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Fold rows into title groups.
///
/// Members keep their input order. Groups are ordered by title ascending,
/// then year descending (groups without a year after those with one), then
/// media kind (movies before TV).
pub fn group_by_title<T: Groupable>(results: Vec<T>) -> Vec<TitleGroup<T>> {
    let mut groups: IndexMap<GroupKey, TitleGroup<T>> = IndexMap::new();

    for result in results {
        let key: GroupKey = (result.title().to_string(), result.year(), result.media_kind());
        groups
            .entry(key)
            .or_insert_with_key(|(title, year, media_kind)| TitleGroup {
                title: title.clone(),
                year: *year,
                media_kind: *media_kind,
                results: Vec::new(),
            })
            .results
            .push(result);
    }

    let mut grouped: Vec<TitleGroup<T>> = groups.into_values().collect();
    grouped.sort_by(|a, b| {
        a.title
            .cmp(&b.title)
            .then_with(|| compare_years_desc(a.year, b.year))
            .then_with(|| a.media_kind.cmp(&b.media_kind))
    });
    grouped
}

/// Break a TV group down by season, with episodes ordered inside each season.
///
/// Only defined for TV groups; movie groups are rejected.
pub fn group_seasons_for_show<T: Groupable + Clone>(
    group: &TitleGroup<T>,
) -> Result<SeasonBreakdown<T>, CoreError> {
    if !group.media_kind.is_episodic() {
        return Err(CoreError::Validation(format!(
            "'{}' is a {} group; season breakdown requires {}",
            group.title,
            group.media_kind,
            MediaKind::Tv
        )));
    }

    let mut seasons: BTreeMap<i32, Vec<T>> = BTreeMap::new();
    let mut unassigned = Vec::new();

    for result in &group.results {
        match result.season() {
            Some(season) => seasons.entry(season).or_default().push(result.clone()),
            None => unassigned.push(result.clone()),
        }
    }

    for episodes in seasons.values_mut() {
        order_episodes(episodes);
    }

    Ok(SeasonBreakdown {
        seasons,
        unassigned,
    })
}

/// Sort by episode number ascending; rows without an episode number go last
/// and keep their relative order.
pub fn order_episodes<T: Groupable>(results: &mut [T]) {
    results.sort_by_key(|r| {
        let episode = r.episode();
        (episode.is_none(), episode)
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
