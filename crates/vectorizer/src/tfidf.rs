//! TF-IDF term weighting.
//!
//! ## Weighting
//! - tf: raw count of the term in the document
//! - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, never zero)
//! - every document vector is L2-normalized
//!
//! Because rows are unit length, cosine similarity between two documents is
//! just their dot product.

use crate::stop_words::is_stop_word;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Position of a term in the fitted vocabulary
pub type TermId = usize;

/// Sparse vector of `(term, weight)` pairs sorted by term id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries; duplicate terms are summed
    pub fn from_entries(entries: impl IntoIterator<Item = (TermId, f32)>) -> Self {
        let mut merged: BTreeMap<TermId, f32> = BTreeMap::new();
        for (term, weight) in entries {
            *merged.entry(term).or_insert(0.0) += weight;
        }
        Self {
            entries: merged.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    pub fn entries(&self) -> &[(TermId, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length; a zero vector stays zero
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product via a merge over the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Split text into lowercase terms of two or more word characters,
/// dropping English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Fitted vocabulary and idf weights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, TermId>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit on a corpus and return the vectorizer together with the
    /// document-term rows, one per input document in order.
    pub fn fit_transform(documents: &[&str]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents.par_iter().map(|d| tokenize(d)).collect();

        // Sorted vocabulary keeps term ids independent of hash order
        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, TermId> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<TermId> = tokens.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for term in unique {
                doc_freq[term] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let rows = tokenized
            .par_iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();

        debug!(
            "Fitted TF-IDF over {} documents, vocabulary size {}",
            documents.len(),
            vectorizer.vocabulary_size()
        );
        (vectorizer, rows)
    }

    /// Vectorize new text with the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored; text with no known terms
    /// yields an empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut vector = SparseVector::from_entries(
            tokens
                .iter()
                .filter_map(|t| self.vocabulary.get(t))
                .map(|&term| (term, self.idf[term])),
        );
        vector.normalize();
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The Dark-Knight rises, in 2012! a"),
            vec!["dark", "knight", "rises", "2012"]
        );
        assert_eq!(tokenize("tomhanks tomhanks"), vec!["tomhanks", "tomhanks"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_idf_smoothing() {
        let docs = ["robots future", "robots romance", "robots cowboys"];
        let (vectorizer, _) = TfidfVectorizer::fit_transform(&docs);

        // df = n gives the minimum idf of exactly 1
        assert!((vectorizer.idf("robots").unwrap() - 1.0).abs() < 1e-6);
        let expected = (4.0f32 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("future").unwrap() - expected).abs() < 1e-6);
        assert!(vectorizer.idf("the").is_none());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = ["robots robots future", "cowboys desert", "the and of"];
        let (_, rows) = TfidfVectorizer::fit_transform(&docs);

        assert!((rows[0].norm() - 1.0).abs() < 1e-5);
        assert!((rows[1].norm() - 1.0).abs() < 1e-5);
        // Only stop words: no terms at all
        assert!(rows[2].is_empty());
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let docs = ["robots future", "cowboys desert"];
        let (vectorizer, rows) = TfidfVectorizer::fit_transform(&docs);

        let query = vectorizer.transform("robots quantum blockchain");
        assert_eq!(query.nnz(), 1);
        assert!(query.dot(&rows[0]) > 0.0);
        assert_eq!(query.dot(&rows[1]), 0.0);

        assert!(vectorizer.transform("xyzzy").is_empty());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let docs = ["zebra apple mango"];
        let (vectorizer, _) = TfidfVectorizer::fit_transform(&docs);
        assert_eq!(vectorizer.term_id("apple"), Some(0));
        assert_eq!(vectorizer.term_id("mango"), Some(1));
        assert_eq!(vectorizer.term_id("zebra"), Some(2));
    }
}
