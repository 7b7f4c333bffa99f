//! Similar Title Source - neighbours of a catalog movie.
//!
//! Reads the movie's row of the precomputed similarity matrix and returns
//! the most similar other movies. The movie itself is always excluded,
//! even when another entry happens to have an identical soup.

use crate::types::{top_by_score, Candidate, CandidateSource};
use data_loader::CatalogIndex;
use std::sync::Arc;
use tracing::{debug, instrument};
use vectorizer::VectorIndex;

pub struct SimilarTitleSource {
    /// Shared reference to the vector index (read-only, so no Mutex needed)
    index: Arc<VectorIndex>,
}

impl SimilarTitleSource {
    pub fn new(index: Arc<VectorIndex>) -> Self {
        Self { index }
    }

    /// Up to `limit` movies most similar to `movie`, by descending similarity
    #[instrument(skip(self))]
    pub fn get_candidates(&self, movie: CatalogIndex, limit: usize) -> Vec<Candidate> {
        let Some(row) = self.index.similarity_row(movie) else {
            debug!("No similarity row for catalog index {}", movie);
            return Vec::new();
        };

        let candidates: Vec<Candidate> = top_by_score(row, limit, |i, _| i != movie)
            .into_iter()
            .map(|(i, similarity)| Candidate::new(i, CandidateSource::SimilarTitle, similarity))
            .collect();

        debug!("Generated {} similar-title candidates", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Arc<VectorIndex> {
        Arc::new(VectorIndex::from_documents(&[
            "robots future war",
            "robots future war",
            "robots future romance",
            "cowboys desert gold",
        ]))
    }

    #[test]
    fn test_excludes_self_even_with_identical_twin() {
        let source = SimilarTitleSource::new(index());
        for movie in 0..4 {
            let candidates = source.get_candidates(movie, 25);
            assert_eq!(candidates.len(), 3);
            assert!(candidates.iter().all(|c| c.index != movie));
        }
        let candidates = source.get_candidates(0, 25);
        assert_eq!(candidates[0].index, 1);
        assert!((candidates[0].similarity - 1.0).abs() < 1e-5);
        assert_eq!(candidates[2].index, 3);
    }

    #[test]
    fn test_limit_and_unknown_index() {
        let source = SimilarTitleSource::new(index());
        assert_eq!(source.get_candidates(2, 1).len(), 1);
        assert!(source.get_candidates(99, 5).is_empty());
    }
}
