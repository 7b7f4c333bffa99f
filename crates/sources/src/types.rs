//! Candidate types shared by the retrieval sources and the ranking stage.

use data_loader::CatalogIndex;
use serde::Serialize;

/// Which retrieval path produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateSource {
    /// Neighbour of a resolved catalog title in the similarity matrix
    SimilarTitle,
    /// Match for an ad-hoc text query
    TextQuery,
}

/// A catalog movie retrieved by similarity, before re-ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub index: CatalogIndex,
    pub source: CandidateSource,
    /// Cosine similarity to the query, in [0, 1]
    pub similarity: f32,
}

impl Candidate {
    pub fn new(index: CatalogIndex, source: CandidateSource, similarity: f32) -> Self {
        Self {
            index,
            source,
            similarity,
        }
    }
}

/// Top `limit` indices by descending score, ties broken by ascending index.
///
/// `keep` decides which positions are eligible at all.
pub(crate) fn top_by_score(
    scores: &[f32],
    limit: usize,
    keep: impl Fn(CatalogIndex, f32) -> bool,
) -> Vec<(CatalogIndex, f32)> {
    let mut ranked: Vec<(CatalogIndex, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, s)| keep(i, s))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_by_score_order_and_ties() {
        let scores = [0.2, 0.9, 0.2, 0.5, 0.0];
        let top = top_by_score(&scores, 3, |_, _| true);
        assert_eq!(top, vec![(1, 0.9), (3, 0.5), (0, 0.2)]);

        let filtered = top_by_score(&scores, 10, |i, s| i != 1 && s > 0.0);
        assert_eq!(filtered.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![3, 0, 2]);
    }
}
