//! Core domain types for the movie catalog.
//!
//! Raw source rows carry their cast, crew, keywords and genres as stringified
//! nested records. The entry types below are the typed form of those records;
//! [`MovieRecord`] is the cleaned, joined row everything downstream works on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB movie identifier, the join key across the three source files
pub type MovieId = u32;

/// Dense, 0-based position of a movie inside a loaded [`Catalog`]
///
/// Positions are stable for the lifetime of one catalog and line up with the
/// rows of the document-term and similarity matrices.
pub type CatalogIndex = usize;

/// Movies with fewer votes than this never enter the catalog
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 10;

// =============================================================================
// Nested Entry Types
// =============================================================================

/// One billed cast member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastEntry {
    pub name: String,
    pub character: String,
    /// Billing order as given by the source, if present
    pub order: Option<i64>,
}

/// One crew member and their job on the film
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewEntry {
    pub name: String,
    pub job: String,
    pub department: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreEntry {
    pub id: Option<i64>,
    pub name: String,
}

// =============================================================================
// MovieRecord
// =============================================================================

/// A single catalog entry after join and cleaning.
///
/// `soup` is derived from the other fields when the record enters a
/// [`Catalog`]; anything placed there beforehand is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// First crew member credited as "Director", empty if none
    pub director: String,
    /// At most three names, in billing order
    pub cast: Vec<String>,
    /// At most three names, in source order
    pub keywords: Vec<String>,
    pub genres: Vec<String>,
    /// Plot synopsis, empty when the source had none
    pub overview: String,
    pub vote_count: u32,
    pub vote_average: f64,
    pub soup: String,
}

// =============================================================================
// Load Diagnostics
// =============================================================================

/// Counters describing what happened to every source row during a load.
///
/// Dropped rows are not errors; this report is the only trace they leave.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub metadata_rows: usize,
    pub below_vote_threshold: usize,
    pub invalid_id: usize,
    pub missing_title: usize,
    pub invalid_field: usize,
    pub malformed_nested: usize,
    pub missing_credits: usize,
    pub missing_keywords: usize,
    pub duplicate_titles: usize,
    pub kept: usize,
}

impl LoadReport {
    /// Total rows dropped for any reason
    pub fn dropped(&self) -> usize {
        self.below_vote_threshold
            + self.invalid_id
            + self.missing_title
            + self.invalid_field
            + self.malformed_nested
            + self.missing_credits
            + self.missing_keywords
            + self.duplicate_titles
    }
}

// =============================================================================
// Source Locations
// =============================================================================

/// Locations of the three source tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub metadata: PathBuf,
    pub credits: PathBuf,
    pub keywords: PathBuf,
}

impl CatalogPaths {
    pub const METADATA_FILE: &'static str = "movies_metadata.csv";
    pub const CREDITS_FILE: &'static str = "credits.csv";
    pub const KEYWORDS_FILE: &'static str = "keywords.csv";

    /// Standard file names inside one data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            metadata: data_dir.join(Self::METADATA_FILE),
            credits: data_dir.join(Self::CREDITS_FILE),
            keywords: data_dir.join(Self::KEYWORDS_FILE),
        }
    }
}

// =============================================================================
// Catalog - The Prepared, Immutable Movie Table
// =============================================================================

/// The prepared catalog: dense rows plus a title lookup.
///
/// Construction goes through [`Catalog::from_records`] or one of the file
/// loaders in [`crate::index`]; after that the catalog is read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) title_index: HashMap<String, CatalogIndex>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get a movie by its catalog position
    pub fn get(&self, index: CatalogIndex) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Catalog position of an exact title
    pub fn index_of(&self, title: &str) -> Option<CatalogIndex> {
        self.title_index.get(title).copied()
    }

    /// Get a movie by exact title
    pub fn get_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.index_of(title).and_then(|i| self.movies.get(i))
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// All titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Feature soups in catalog order
    pub fn soups(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.soup.as_str()).collect()
    }
}
