//! # Recommender
//!
//! The engine the presentation layer talks to. It owns the catalog and every
//! structure derived from it:
//! 1. Catalog (loaded once)
//! 2. Vector index: TF-IDF rows plus the pairwise similarity matrix
//! 3. Title resolver
//! 4. Candidate sources for both query paths
//! 5. Weighted-rating ranker with cached `m` and `C`
//!
//! Everything is built by [`Recommender::new`] and immutable afterwards, so
//! one instance can serve concurrent queries behind an `Arc` without locks.
//!
//! Two entry points:
//! - [`Recommender::recommend_by_title`]: resolve → neighbours → re-rank
//! - [`Recommender::recommend_by_text`]: vectorize → scan → re-rank

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{Catalog, CatalogIndex, CatalogPaths};
use pipeline::{RankedCandidate, Ranker, RatingStats, WeightedRatingRanker};
use sources::{Candidate, ResolveError, SimilarTitleSource, TextQuerySource, TitleMatch, TitleResolver};
use vectorizer::VectorIndex;

use crate::config::RecommenderConfig;

/// Message returned when a title query matches nothing
pub const NO_MATCH_MESSAGE: &str = "No close match found for your query. Please try again.";

/// One re-ranked recommendation with the numbers behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMovie {
    pub index: CatalogIndex,
    pub title: String,
    pub similarity: f32,
    pub weighted_rating: f64,
    pub vote_count: u32,
    pub vote_average: f64,
}

/// Result of a by-title query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TitleRecommendations {
    Matched {
        title: String,
        score: u8,
        titles: Vec<String>,
    },
    NoMatch {
        message: String,
    },
}

impl TitleRecommendations {
    /// The matched title, or the failure message
    pub fn headline(&self) -> &str {
        match self {
            Self::Matched { title, .. } => title,
            Self::NoMatch { message } => message,
        }
    }

    /// Recommended titles; empty when nothing matched
    pub fn titles(&self) -> &[String] {
        match self {
            Self::Matched { titles, .. } => titles,
            Self::NoMatch { .. } => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// `(matched title or message, titles)`
    pub fn into_parts(self) -> (String, Vec<String>) {
        match self {
            Self::Matched { title, titles, .. } => (title, titles),
            Self::NoMatch { message } => (message, Vec::new()),
        }
    }
}

/// Detailed by-title result: the resolved match and its ranked neighbours
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleRanking {
    pub matched: TitleMatch,
    pub movies: Vec<RankedMovie>,
}

/// Immutable recommendation engine over one catalog
pub struct Recommender {
    catalog: Arc<Catalog>,
    index: Arc<VectorIndex>,
    resolver: TitleResolver,
    similar_titles: SimilarTitleSource,
    text_query: TextQuerySource,
    ranker: WeightedRatingRanker,
    config: RecommenderConfig,
}

impl Recommender {
    /// Build the engine over an already prepared catalog
    pub fn new(catalog: Catalog, config: RecommenderConfig) -> Self {
        let start = Instant::now();
        let catalog = Arc::new(catalog);
        let index = Arc::new(VectorIndex::build(&catalog));
        let resolver = TitleResolver::new(&catalog).with_threshold(config.match_threshold);
        let similar_titles = SimilarTitleSource::new(index.clone());
        let text_query = TextQuerySource::new(index.clone());
        let ranker = WeightedRatingRanker::new(catalog.clone(), config.vote_quantile);

        info!(
            "Recommender ready over {} movies in {:?}",
            catalog.len(),
            start.elapsed()
        );
        Self {
            catalog,
            index,
            resolver,
            similar_titles,
            text_query,
            ranker,
            config,
        }
    }

    /// Load the three source files and build the engine.
    ///
    /// Any load failure is fatal: no engine exists without a valid catalog.
    pub fn load(paths: &CatalogPaths, config: RecommenderConfig) -> Result<Self> {
        let (catalog, report) = Catalog::load_with_report(paths, config.min_vote_count)
            .context("Failed to load movie catalog")?;
        debug!("Catalog load report: {:?}", report);
        Ok(Self::new(catalog, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn resolver(&self) -> &TitleResolver {
        &self.resolver
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn rating_stats(&self) -> RatingStats {
        self.ranker.stats()
    }

    /// Recommend titles similar to the catalog movie best matching `query`
    #[instrument(skip(self))]
    pub fn recommend_by_title(&self, query: &str) -> TitleRecommendations {
        match self.rank_by_title(query) {
            Ok(ranking) => TitleRecommendations::Matched {
                title: ranking.matched.title,
                score: ranking.matched.score,
                titles: ranking.movies.into_iter().map(|m| m.title).collect(),
            },
            Err(err) => {
                debug!("Title query failed: {}", err);
                TitleRecommendations::NoMatch {
                    message: NO_MATCH_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Recommend titles matching a free-text description
    #[instrument(skip(self))]
    pub fn recommend_by_text(&self, query: &str) -> Vec<String> {
        self.rank_by_text(query).into_iter().map(|m| m.title).collect()
    }

    /// By-title query with scores attached
    pub fn rank_by_title(&self, query: &str) -> Result<TitleRanking, ResolveError> {
        let matched = self.resolver.resolve(query)?;
        let candidates = self
            .similar_titles
            .get_candidates(matched.index, self.config.candidate_pool);
        let movies = self.rerank(candidates);
        Ok(TitleRanking { matched, movies })
    }

    /// By-text query with scores attached
    pub fn rank_by_text(&self, query: &str) -> Vec<RankedMovie> {
        let candidates = self
            .text_query
            .get_candidates(query, self.config.candidate_pool);
        self.rerank(candidates)
    }

    fn rerank(&self, candidates: Vec<Candidate>) -> Vec<RankedMovie> {
        let pool = candidates.len();
        let ranked = self.ranker.rank(candidates);
        let movies: Vec<RankedMovie> = ranked
            .into_iter()
            .take(self.config.top_n)
            .filter_map(|r| self.to_ranked_movie(r))
            .collect();
        debug!(
            "{} re-ranked {} candidates, returning {}",
            self.ranker.name(),
            pool,
            movies.len()
        );
        movies
    }

    fn to_ranked_movie(&self, ranked: RankedCandidate) -> Option<RankedMovie> {
        let movie = self.catalog.get(ranked.index())?;
        Some(RankedMovie {
            index: ranked.index(),
            title: movie.title.clone(),
            similarity: ranked.candidate.similarity,
            weighted_rating: ranked.score,
            vote_count: movie.vote_count,
            vote_average: movie.vote_average,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    fn recommender() -> Recommender {
        let records = (0..8)
            .map(|i| MovieRecord {
                id: i,
                title: format!("Space Saga {}", i),
                director: "Jane Doe".into(),
                genres: vec!["Science Fiction".into()],
                overview: "Starships battle across the galaxy.".into(),
                vote_count: 100 + i * 10,
                vote_average: 6.0 + i as f64 * 0.2,
                ..Default::default()
            })
            .collect();
        Recommender::new(Catalog::from_records(records), RecommenderConfig::default())
    }

    #[test]
    fn test_into_parts() {
        let no_match = TitleRecommendations::NoMatch { message: "nope".into() };
        assert_eq!(no_match.titles().len(), 0);
        assert_eq!(no_match.into_parts(), ("nope".to_string(), vec![]));
    }

    #[test]
    fn test_top_n_respected() {
        let engine = recommender();
        let result = engine.recommend_by_title("Space Saga 3");
        assert_eq!(result.headline(), "Space Saga 3");
        assert_eq!(result.titles().len(), 5);

        let small = Recommender::new(
            Catalog::from_records(engine.catalog().movies().to_vec()),
            RecommenderConfig::default().with_top_n(2),
        );
        assert_eq!(small.recommend_by_text("galaxy starships").len(), 2);
    }

    #[test]
    fn test_ranked_scores_descend() {
        let engine = recommender();
        let ranked = engine.rank_by_text("starships galaxy");
        assert!(ranked.windows(2).all(|w| w[0].weighted_rating >= w[1].weighted_rating));
    }
}
