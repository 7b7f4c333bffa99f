//! Re-ranking by Bayesian weighted rating.
//!
//! ```text
//! score = v / (v + m) * R + m / (m + v) * C
//! ```
//!
//! `v` and `R` are the candidate's vote count and average; `m` and `C` come
//! from [`RatingStats`] over the whole catalog. A title with few votes is
//! pulled toward the catalog mean, so a close but thinly-rated match can't
//! outrank a well-established one on similarity alone.

use crate::rating_stats::RatingStats;
use crate::traits::{RankedCandidate, Ranker};
use data_loader::Catalog;
use sources::Candidate;
use std::sync::Arc;
use tracing::debug;

/// Weighted rating for one movie
pub fn weighted_rating(vote_count: u32, vote_average: f64, stats: &RatingStats) -> f64 {
    let v = vote_count as f64;
    let m = stats.m;
    if v + m == 0.0 {
        return stats.c;
    }
    (v / (v + m)) * vote_average + (m / (m + v)) * stats.c
}

pub struct WeightedRatingRanker {
    catalog: Arc<Catalog>,
    stats: RatingStats,
}

impl WeightedRatingRanker {
    /// Create a ranker with statistics precomputed from `catalog`
    pub fn new(catalog: Arc<Catalog>, vote_quantile: f64) -> Self {
        let stats = RatingStats::from_catalog(&catalog, vote_quantile);
        debug!("Weighted rating stats: m = {:.2}, C = {:.3}", stats.m, stats.c);
        Self { catalog, stats }
    }

    pub fn stats(&self) -> RatingStats {
        self.stats
    }
}

impl Ranker for WeightedRatingRanker {
    fn name(&self) -> &str {
        "WeightedRatingRanker"
    }

    fn rank(&self, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.catalog.get(candidate.index)?;
                let score = weighted_rating(movie.vote_count, movie.vote_average, &self.stats);
                Some(RankedCandidate { candidate, score })
            })
            .collect();

        // sort_by is stable: equal scores keep similarity order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;
    use sources::CandidateSource;

    fn stats() -> RatingStats {
        RatingStats { m: 100.0, c: 6.0 }
    }

    #[test]
    fn test_formula() {
        let score = weighted_rating(100, 8.0, &stats());
        assert!((score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_average() {
        let s = stats();
        assert!(weighted_rating(50, 8.0, &s) > weighted_rating(50, 7.0, &s));
    }

    #[test]
    fn test_shrinks_toward_mean_with_few_votes() {
        let s = stats();
        let few = weighted_rating(10, 9.0, &s);
        let many = weighted_rating(10_000, 9.0, &s);
        assert!((few - s.c).abs() < (many - s.c).abs());
        assert!(many > few);
        assert!((weighted_rating(0, 9.0, &s) - s.c).abs() < 1e-9);
    }

    #[test]
    fn test_rank_orders_by_weighted_rating() {
        let catalog = Arc::new(Catalog::from_records(vec![
            MovieRecord { id: 1, title: "Thin".into(), vote_count: 10, vote_average: 9.5, ..Default::default() },
            MovieRecord { id: 2, title: "Solid".into(), vote_count: 5000, vote_average: 8.0, ..Default::default() },
            MovieRecord { id: 3, title: "Poor".into(), vote_count: 3000, vote_average: 4.0, ..Default::default() },
            MovieRecord { id: 4, title: "Twin".into(), vote_count: 5000, vote_average: 8.0, ..Default::default() },
        ]));
        let ranker = WeightedRatingRanker::new(catalog, 0.6);

        let candidates = vec![
            Candidate::new(0, CandidateSource::SimilarTitle, 0.9),
            Candidate::new(2, CandidateSource::SimilarTitle, 0.8),
            Candidate::new(3, CandidateSource::SimilarTitle, 0.7),
            Candidate::new(1, CandidateSource::SimilarTitle, 0.6),
            Candidate::new(42, CandidateSource::SimilarTitle, 0.5),
        ];
        let order: Vec<usize> = ranker.rank(candidates).iter().map(|r| r.index()).collect();

        // Twin and Solid tie: similarity order decides. Unknown index dropped.
        assert_eq!(order, vec![3, 1, 0, 2]);
    }
}
