//! Text Query Source - catalog movies matching a free-text description.
//!
//! The query goes through the same fitted vectorizer as the catalog and is
//! scored against every row on demand. Every catalog position is eligible, so
//! the pool is only smaller than `limit` when the catalog is.

use crate::types::{top_by_score, Candidate, CandidateSource};
use std::sync::Arc;
use tracing::{debug, instrument};
use vectorizer::VectorIndex;

pub struct TextQuerySource {
    index: Arc<VectorIndex>,
}

impl TextQuerySource {
    pub fn new(index: Arc<VectorIndex>) -> Self {
        Self { index }
    }

    #[instrument(skip(self))]
    pub fn get_candidates(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let scores = self.index.query_similarities(query);
        let candidates: Vec<Candidate> = top_by_score(&scores, limit, |_, _| true)
            .into_iter()
            .map(|(i, similarity)| Candidate::new(i, CandidateSource::TextQuery, similarity))
            .collect();

        debug!("Generated {} text-query candidates", candidates.len());
        candidates
    }
}
