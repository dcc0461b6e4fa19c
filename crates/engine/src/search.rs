//! Title search over submission metadata, and display grouping of the
//! results.
//!
//! A search runs in four steps: load the distinct title universe, score it
//! against the query, materialize one result per
//! `(fingerprint, year, season, episode)` for the matched titles, then
//! attach ranked submissions and order the results by the requested
//! strategy.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use mkvmender_core::error::CoreError;
use mkvmender_core::grouping::{self, Groupable, SeasonBreakdown, TitleGroup};
use mkvmender_core::matching::match_titles;
use mkvmender_core::media::{MediaKind, SortStrategy};
use mkvmender_core::ranking::{self, order_by_standing, sort_results, RankedResult};
use mkvmender_db::models::search::TitleRow;
use mkvmender_db::models::submission::SubmissionWithVotes;
use mkvmender_db::repositories::{SearchRepo, SubmissionRepo};
use serde::Serialize;

use crate::error::EngineResult;
use crate::NamingEngine;

/// One matched `(fingerprint, year, season, episode)` with its namings.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub year: Option<i32>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub media_type: MediaKind,
    pub hash: String,
    pub file_size: i64,
    pub match_score: i64,
    /// Best first. May be empty.
    pub submissions: Vec<SubmissionWithVotes>,
}

impl SearchResult {
    fn from_row(row: TitleRow, match_score: i64) -> Result<Self, CoreError> {
        Ok(Self {
            media_type: MediaKind::parse(&row.media_type)?,
            title: row.title,
            year: row.year,
            season: row.season,
            episode: row.episode,
            hash: row.hash,
            file_size: row.file_size,
            match_score,
            submissions: Vec::new(),
        })
    }

    /// Highest-ranked naming, if any.
    pub fn best_submission(&self) -> Option<&SubmissionWithVotes> {
        ranking::best_submission(&self.submissions)
    }
}

impl RankedResult for SearchResult {
    type Submission = SubmissionWithVotes;

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn fingerprint(&self) -> &str {
        &self.hash
    }

    fn match_score(&self) -> i64 {
        self.match_score
    }

    fn submissions(&self) -> &[SubmissionWithVotes] {
        &self.submissions
    }
}

impl Groupable for SearchResult {
    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn media_kind(&self) -> MediaKind {
        self.media_type
    }

    fn season(&self) -> Option<i32> {
        self.season
    }

    fn episode(&self) -> Option<i32> {
        self.episode
    }
}

impl NamingEngine {
    /// Search namings by title.
    ///
    /// `fuzzy: None` uses the engine's configured default. An empty query or
    /// no matching title is an empty result, not an error.
    pub async fn search(
        &self,
        query: &str,
        sort: SortStrategy,
        fuzzy: Option<bool>,
    ) -> EngineResult<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let fuzzy = fuzzy.unwrap_or(self.fuzzy_search_default);

        let universe = SearchRepo::distinct_titles(&self.pool).await?;
        let matches = match_titles(query, &universe, fuzzy);
        if matches.is_empty() {
            tracing::debug!(query, fuzzy, candidates = universe.len(), "No titles matched");
            return Ok(Vec::new());
        }

        let scores: HashMap<&str, i64> = matches
            .iter()
            .map(|m| (m.title.as_str(), m.score))
            .collect();
        let titles: Vec<String> = matches.iter().map(|m| m.title.clone()).collect();
        let rows = SearchRepo::rows_for_titles(&self.pool, &titles).await?;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for row in rows {
            if !seen.insert((row.hash.clone(), row.year, row.season, row.episode)) {
                continue;
            }
            let score = scores.get(row.title.as_str()).copied().unwrap_or_default();
            results.push(SearchResult::from_row(row, score)?);
        }

        self.attach_submissions(&mut results).await?;
        sort_results(&mut results, sort);

        tracing::debug!(
            query,
            fuzzy,
            sort = sort.as_str(),
            candidates = universe.len(),
            matched_titles = matches.len(),
            results = results.len(),
            "Title search",
        );
        Ok(results)
    }

    /// Fetch submissions for every distinct fingerprint in one query and
    /// hand each result its ranked list.
    async fn attach_submissions(&self, results: &mut [SearchResult]) -> EngineResult<()> {
        let hashes: Vec<String> = results
            .iter()
            .map(|r| r.hash.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        let mut submissions = SubmissionRepo::list_with_votes_by_hashes(&self.pool, &hashes).await?;
        self.attach_metadata(&mut submissions).await?;

        let mut by_hash: HashMap<String, Vec<SubmissionWithVotes>> = HashMap::new();
        for submission in submissions {
            by_hash
                .entry(submission.hash.clone())
                .or_default()
                .push(submission);
        }
        for list in by_hash.values_mut() {
            order_by_standing(list);
        }

        for result in results.iter_mut() {
            result.submissions = by_hash.get(&result.hash).cloned().unwrap_or_default();
        }
        Ok(())
    }

    /// Fold search results into `(title, year, media kind)` groups.
    pub fn group_by_title(results: Vec<SearchResult>) -> Vec<TitleGroup<SearchResult>> {
        grouping::group_by_title(results)
    }

    /// Break a TV group down by season. Movie groups are rejected.
    pub fn group_seasons_for_show(
        group: &TitleGroup<SearchResult>,
    ) -> EngineResult<SeasonBreakdown<SearchResult>> {
        Ok(grouping::group_seasons_for_show(group)?)
    }

    /// Episode ascending; unnumbered episodes last in their input order.
    pub fn order_episodes(results: &mut [SearchResult]) {
        grouping::order_episodes(results);
    }
}
