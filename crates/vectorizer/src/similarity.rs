//! Cosine similarity and the precomputed catalog × catalog matrix.

use crate::tfidf::SparseVector;
use rayon::prelude::*;

/// Cosine similarity between two sparse vectors.
///
/// Zero vectors are similar to nothing (0.0).
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Dense, row-major, symmetric similarity matrix.
///
/// Memory is quadratic in the catalog size; lookups are a slice index.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise cosine similarities of L2-normalized rows.
    ///
    /// Each row is accumulated through an inverted index over the terms, so
    /// the cost tracks the number of shared terms rather than `n²` merges.
    pub fn from_rows(rows: &[SparseVector]) -> Self {
        let size = rows.len();
        let mut postings: Vec<Vec<(usize, f32)>> = Vec::new();
        for (doc, row) in rows.iter().enumerate() {
            for &(term, weight) in row.entries() {
                if term >= postings.len() {
                    postings.resize_with(term + 1, Vec::new);
                }
                postings[term].push((doc, weight));
            }
        }

        let values: Vec<f32> = rows
            .par_iter()
            .flat_map_iter(|row| {
                let mut scores = vec![0.0f32; size];
                for &(term, weight) in row.entries() {
                    for &(doc, other) in &postings[term] {
                        scores[doc] += weight * other;
                    }
                }
                scores.into_iter().map(|s| s.clamp(0.0, 1.0))
            })
            .collect();

        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Similarities of one document against every document, including itself
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.size {
            return None;
        }
        Some(&self.values[index * self.size..(index + 1) * self.size])
    }

    pub fn get(&self, a: usize, b: usize) -> Option<f32> {
        self.row(a).and_then(|row| row.get(b).copied())
    }
}
