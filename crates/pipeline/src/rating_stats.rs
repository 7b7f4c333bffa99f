//! Catalog-wide rating statistics used by the weighted rating.
//!
//! - `m`: a vote-count quantile (60th percentile by default)
//! - `c`: the mean vote average
//!
//! Both depend only on the immutable catalog, so they are computed once at
//! build time instead of on every query.

use data_loader::Catalog;
use serde::Serialize;

pub const DEFAULT_VOTE_QUANTILE: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingStats {
    /// Minimum votes needed to trust a movie's own average
    pub m: f64,
    /// Mean vote average across the catalog
    pub c: f64,
}

impl RatingStats {
    pub fn from_catalog(catalog: &Catalog, quantile: f64) -> Self {
        let counts: Vec<f64> = catalog.movies().iter().map(|m| m.vote_count as f64).collect();
        let averages: Vec<f64> = catalog.movies().iter().map(|m| m.vote_average).collect();
        Self {
            m: quantile_of(counts, quantile),
            c: mean(&averages),
        }
    }
}

/// Linear-interpolated quantile (numpy/pandas default), 0 for no values
pub fn quantile_of(mut values: Vec<f64>, q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    #[test]
    fn test_quantile_interpolates() {
        assert!((quantile_of(vec![10.0, 20.0, 30.0, 40.0, 50.0], 0.6) - 34.0).abs() < 1e-9);
        assert_eq!(quantile_of(vec![50.0, 10.0], 0.5), 30.0);
        assert_eq!(quantile_of(vec![7.0], 0.6), 7.0);
        assert_eq!(quantile_of(vec![], 0.6), 0.0);
    }

    #[test]
    fn test_stats_from_catalog() {
        let catalog = Catalog::from_records(
            [(10, 6.0), (20, 7.0), (30, 8.0), (40, 5.0), (50, 9.0)]
                .into_iter()
                .enumerate()
                .map(|(i, (votes, avg))| MovieRecord {
                    id: i as u32,
                    title: format!("Movie {}", i),
                    vote_count: votes,
                    vote_average: avg,
                    ..Default::default()
                })
                .collect(),
        );
        let stats = RatingStats::from_catalog(&catalog, DEFAULT_VOTE_QUANTILE);
        assert!((stats.m - 34.0).abs() < 1e-9);
        assert!((stats.c - 7.0).abs() < 1e-9);
    }
}
