//! # Sources Crate
//!
//! Candidate retrieval for movie recommendations.
//!
//! ## Components
//!
//! ### Title Resolver
//! Fuzzy-matches a typed title to a catalog entry, tolerating typos:
//! "Batmn Begins" resolves to "Batman Begins".
//!
//! ### Similar Title Source
//! Neighbours of a resolved movie, read from the precomputed similarity
//! matrix (the movie itself excluded).
//!
//! ### Text Query Source
//! Movies matching an ad-hoc description, scored on demand against every
//! catalog row.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{SimilarTitleSource, TextQuerySource, TitleResolver};
//!
//! let resolver = TitleResolver::new(&catalog);
//! let matched = resolver.resolve("Batmn Begins")?;
//!
//! let similar = SimilarTitleSource::new(index.clone());
//! let candidates = similar.get_candidates(matched.index, 25);
//!
//! let text = TextQuerySource::new(index.clone());
//! let candidates = text.get_candidates("dystopian future robots", 25);
//! ```

// Public modules
pub mod fuzzy;
pub mod resolver;
pub mod similar_titles;
pub mod text_query;
pub mod types;

// Re-export commonly used types
pub use resolver::{ResolveError, TitleMatch, TitleResolver, DEFAULT_MATCH_THRESHOLD};
pub use similar_titles::SimilarTitleSource;
pub use text_query::TextQuerySource;
pub use types::{Candidate, CandidateSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(1, CandidateSource::SimilarTitle, 0.85);
        assert_eq!(candidate.index, 1);
        assert_eq!(candidate.source, CandidateSource::SimilarTitle);
        assert_eq!(candidate.similarity, 0.85);
    }
}
