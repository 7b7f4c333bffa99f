//! # Data Loader Crate
//!
//! This crate loads the TMDB movie tables and prepares the immutable catalog
//! the recommendation engine indexes.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, entry types, Catalog, LoadReport)
//! - **parser**: Read the three CSV sources into raw rows
//! - **literal**: Parse stringified nested fields (cast, crew, keywords, genres)
//! - **index**: Join, filter, clean and deduplicate into a Catalog
//! - **soup**: Build the weighted feature soup for each movie
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data/tmdb"))?;
//! let movie = catalog.get_by_title("Toy Story").unwrap();
//! println!("{} directed by {}", movie.title, movie.director);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod literal;
pub mod parser;
pub mod index;
pub mod soup;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use soup::{build_soup, clean_name};
pub use types::{
    // Type aliases
    CatalogIndex,
    MovieId,
    // Core types
    Catalog,
    CatalogPaths,
    LoadReport,
    MovieRecord,
    // Nested entries
    CastEntry,
    CrewEntry,
    GenreEntry,
    KeywordEntry,
    DEFAULT_MIN_VOTE_COUNT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.titles().count(), 0);
    }
}
