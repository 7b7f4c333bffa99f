//! Server crate for the CineRecs recommendation engine.
//!
//! This crate contains the [`Recommender`] that coordinates all components
//! of the recommendation pipeline, and its configuration.

pub mod config;
pub mod recommender;

pub use config::RecommenderConfig;
pub use recommender::{
    RankedMovie, Recommender, TitleRanking, TitleRecommendations, NO_MATCH_MESSAGE,
};
