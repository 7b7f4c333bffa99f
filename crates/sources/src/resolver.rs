//! Title Resolver - fuzzy match a user's query to one catalog title.
//!
//! ## Algorithm
//! 1. Score the query against every catalog title with
//!    [`weighted_ratio`](crate::fuzzy::weighted_ratio)
//! 2. Keep the best score; ties go to the lower catalog index
//! 3. Accept only if the score is strictly above the threshold (default 60)

use crate::fuzzy::{full_process, weighted_ratio};
use data_loader::{Catalog, CatalogIndex};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Scores must exceed this to count as a match
pub const DEFAULT_MATCH_THRESHOLD: u8 = 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing scored above the threshold
    #[error("No title matched '{query}' (best score {best_score})")]
    NoMatchFound { query: String, best_score: u8 },

    /// There are no titles to match against
    #[error("The catalog has no titles")]
    EmptyCatalog,
}

/// A resolved title and its fuzzy score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleMatch {
    pub index: CatalogIndex,
    pub title: String,
    pub score: u8,
}

/// Resolves free text to catalog titles
#[derive(Debug, Clone)]
pub struct TitleResolver {
    titles: Vec<String>,
    threshold: u8,
}

impl TitleResolver {
    /// Create a resolver over the catalog's titles, in catalog order
    pub fn new(catalog: &Catalog) -> Self {
        Self::from_titles(catalog.titles().map(str::to_string).collect())
    }

    pub fn from_titles(titles: Vec<String>) -> Self {
        Self {
            titles,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Configure the acceptance threshold (default: 60, exclusive)
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Resolve a query to the single best title
    #[instrument(skip(self), fields(titles = self.titles.len()))]
    pub fn resolve(&self, query: &str) -> Result<TitleMatch, ResolveError> {
        if self.titles.is_empty() {
            return Err(ResolveError::EmptyCatalog);
        }
        let no_match = |best_score| ResolveError::NoMatchFound {
            query: query.to_string(),
            best_score,
        };
        if full_process(query).is_empty() {
            return Err(no_match(0));
        }

        let (index, score) = self
            .titles
            .par_iter()
            .enumerate()
            .map(|(i, title)| (i, weighted_ratio(query, title)))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .ok_or(ResolveError::EmptyCatalog)?;

        debug!("Best match for '{}': '{}' ({})", query, self.titles[index], score);
        if score > self.threshold {
            Ok(TitleMatch {
                index,
                title: self.titles[index].clone(),
                score,
            })
        } else {
            Err(no_match(score))
        }
    }

    /// The `limit` best scoring titles, regardless of threshold
    pub fn top_matches(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        let mut scored: Vec<(CatalogIndex, u8)> = self
            .titles
            .par_iter()
            .enumerate()
            .map(|(i, title)| (i, weighted_ratio(query, title)))
            .filter(|&(_, score)| score > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(limit)
            .map(|(index, score)| TitleMatch {
                index,
                title: self.titles[index].clone(),
                score,
            })
            .collect()
    }
}
