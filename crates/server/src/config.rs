//! Tunables for the recommendation engine.

use data_loader::DEFAULT_MIN_VOTE_COUNT;
use pipeline::DEFAULT_VOTE_QUANTILE;
use sources::DEFAULT_MATCH_THRESHOLD;

/// Engine configuration
///
/// Defaults: 25 candidates, top 5 results, fuzzy threshold 60 (exclusive),
/// movies need at least 10 votes, `m` is the 60th vote-count percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    pub candidate_pool: usize,
    pub top_n: usize,
    pub match_threshold: u8,
    pub min_vote_count: u32,
    pub vote_quantile: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            candidate_pool: 25,
            top_n: 5,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            min_vote_count: DEFAULT_MIN_VOTE_COUNT,
            vote_quantile: DEFAULT_VOTE_QUANTILE,
        }
    }
}

impl RecommenderConfig {
    /// Number of similarity candidates passed to re-ranking (default: 25)
    pub fn with_candidate_pool(mut self, size: usize) -> Self {
        self.candidate_pool = size;
        self
    }

    /// Number of titles returned (default: 5)
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_match_threshold(mut self, threshold: u8) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Only applies when loading from files (default: 10)
    pub fn with_min_vote_count(mut self, count: u32) -> Self {
        self.min_vote_count = count;
        self
    }

    pub fn with_vote_quantile(mut self, quantile: f64) -> Self {
        self.vote_quantile = quantile;
        self
    }
}
