//! Core trait for the re-ranking stage.
//!
//! Retrieval produces candidates ordered by similarity; a [`Ranker`] reorders
//! them by whatever quality signal it models.

use data_loader::CatalogIndex;
use serde::Serialize;
use sources::Candidate;

/// A candidate with the score it was re-ranked by
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

impl RankedCandidate {
    pub fn index(&self) -> CatalogIndex {
        self.candidate.index
    }
}

/// Reorders a candidate set.
///
/// `Send + Sync` lets one ranker serve concurrent queries.
pub trait Ranker: Send + Sync {
    /// Returns the name of this ranker (for logging/debugging)
    fn name(&self) -> &str;

    /// Score and sort candidates, best first.
    ///
    /// Takes ownership of the candidates; implementations must be stable so
    /// equal scores keep their incoming (similarity) order.
    fn rank(&self, candidates: Vec<Candidate>) -> Vec<RankedCandidate>;
}
