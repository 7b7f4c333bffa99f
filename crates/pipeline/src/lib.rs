//! Re-ranking stage of the recommendation pipeline.
//!
//! This crate provides:
//! - the [`Ranker`] trait for candidate re-ranking
//! - [`RatingStats`]: catalog-wide `m` and `C`, computed once
//! - [`WeightedRatingRanker`]: Bayesian weighted-rating re-ranking
//!
//! ## Architecture
//! 1. Sources retrieve up to 25 candidates by similarity
//! 2. A ranker scores each candidate by weighted rating
//! 3. The caller keeps the top few
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Ranker, WeightedRatingRanker};
//!
//! let ranker = WeightedRatingRanker::new(catalog.clone(), 0.60);
//! let ranked = ranker.rank(candidates);
//! ```

pub mod rating_stats;
pub mod traits;
pub mod weighted_rating;

// Re-export main types
pub use rating_stats::{RatingStats, DEFAULT_VOTE_QUANTILE};
pub use traits::{RankedCandidate, Ranker};
pub use weighted_rating::{weighted_rating, WeightedRatingRanker};
