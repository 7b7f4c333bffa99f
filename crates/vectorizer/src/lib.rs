//! # Vectorizer Crate
//!
//! TF-IDF vector space over the catalog's feature soups.
//!
//! ## Components
//!
//! - **tfidf**: tokenizer, [`TfidfVectorizer`] fit/transform, [`SparseVector`]
//! - **stop_words**: the English stop-word list
//! - **similarity**: cosine similarity and the precomputed [`SimilarityMatrix`]
//!
//! [`VectorIndex`] bundles all three for one catalog. It is built once and
//! never mutated, so it can be shared freely behind an `Arc`.
//!
//! ## Example Usage
//!
//! ```ignore
//! let index = VectorIndex::build(&catalog);
//! let similar = index.similarity_row(0).unwrap();
//! let free_text = index.query_similarities("dystopian future robots");
//! ```

pub mod similarity;
pub mod stop_words;
pub mod tfidf;

pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use tfidf::{tokenize, SparseVector, TermId, TfidfVectorizer};

use data_loader::{Catalog, CatalogIndex};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Fitted vectorizer, document-term rows and pairwise similarity matrix
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    vectorizer: TfidfVectorizer,
    documents: Vec<SparseVector>,
    similarity: SimilarityMatrix,
}

impl VectorIndex {
    /// Build the index over a catalog's soups, aligned to catalog positions
    pub fn build(catalog: &Catalog) -> Self {
        Self::from_documents(&catalog.soups())
    }

    pub fn from_documents(documents: &[&str]) -> Self {
        let start = Instant::now();
        let (vectorizer, documents) = TfidfVectorizer::fit_transform(documents);
        let similarity = SimilarityMatrix::from_rows(&documents);
        info!(
            "Built vector index: {} documents, {} terms in {:?}",
            documents.len(),
            vectorizer.vocabulary_size(),
            start.elapsed()
        );
        Self {
            vectorizer,
            documents,
            similarity,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn document(&self, index: CatalogIndex) -> Option<&SparseVector> {
        self.documents.get(index)
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Precomputed similarities of one catalog movie to every movie
    pub fn similarity_row(&self, index: CatalogIndex) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    /// Similarity of free text to every catalog row, computed on demand
    pub fn query_similarities(&self, text: &str) -> Vec<f32> {
        let query = self.vectorizer.transform(text);
        if query.is_empty() {
            return vec![0.0; self.documents.len()];
        }
        self.documents
            .par_iter()
            .map(|doc| cosine_similarity(&query, doc))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    #[test]
    fn test_build_from_catalog() {
        let catalog = Catalog::from_records(vec![
            MovieRecord {
                id: 1,
                title: "Robot Uprising".into(),
                overview: "Robots seize a dystopian future city.".into(),
                vote_count: 50,
                ..Default::default()
            },
            MovieRecord {
                id: 2,
                title: "Prairie Song".into(),
                overview: "A cowboy rides across the desert.".into(),
                vote_count: 50,
                ..Default::default()
            },
        ]);
        let index = VectorIndex::build(&catalog);

        assert_eq!(index.len(), 2);
        assert_eq!(index.similarity_row(0).unwrap().len(), 2);

        let scores = index.query_similarities("dystopian robots");
        assert!(scores[0] > 0.0);
        assert_eq!(scores[1], 0.0);
        assert_eq!(index.query_similarities("nothing matches here qqq"), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_index() {
        let index = VectorIndex::from_documents(&[]);
        assert!(index.is_empty());
        assert!(index.query_similarities("anything").is_empty());
        assert!(index.similarity_row(0).is_none());
    }
}
