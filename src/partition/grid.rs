//! Evenly spaced triangular partitioning.

use super::{FuzzySet, FuzzySetTable, Membership, Partitioner};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Grid partitioner.
///
/// Splits the observed range, widened by 10% on each side, into `partitions`
/// overlapping triangular sets with evenly spaced peaks. Labels are the prefix
/// followed by the set position (`A0`, `A1`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPartitioner {
    partitions: usize,
    prefix: String,
    sets: FuzzySetTable,
}

impl GridPartitioner {
    pub fn new(partitions: usize) -> Result<Self> {
        if partitions < 2 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "grid partitioner needs at least 2 partitions, got {}",
                partitions
            )));
        }
        Ok(Self {
            partitions,
            prefix: "A".to_string(),
            sets: FuzzySetTable::new(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Range of the data widened by 10% away from zero on each side.
fn widened_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let lower = if min < 0.0 { min * 1.1 } else { min * 0.9 };
    let upper = if max > 0.0 { max * 1.1 } else { max * 0.9 };

    if upper - lower < 1e-10 {
        (lower - 1.0, upper + 1.0)
    } else {
        (lower, upper)
    }
}

impl Partitioner for GridPartitioner {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }

        let (lower, upper) = widened_bounds(values);
        let step = (upper - lower) / (self.partitions - 1) as f64;

        self.sets = (0..self.partitions)
            .map(|i| {
                let peak = lower + step * i as f64;
                FuzzySet::triangular(
                    format!("{}{}", self.prefix, i),
                    peak - step,
                    peak,
                    peak + step,
                )
            })
            .collect();
        Ok(())
    }

    fn sets(&self) -> &FuzzySetTable {
        &self.sets
    }

    /// Values outside every set's support are clamped to the set with the
    /// nearest centroid, with full membership.
    fn fuzzify(&self, value: f64, alpha_cut: f64) -> Result<Vec<Membership>> {
        if self.sets.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "grid partitioner is not fitted".to_string(),
            ));
        }
        if !value.is_finite() {
            return Err(ForecastError::MissingValues);
        }

        let degrees: Vec<f64> = self.sets.iter().map(|s| s.membership(value)).collect();
        let (best, best_degree) = degrees
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (i, d)| if d > acc.1 { (i, d) } else { acc });

        if best_degree <= 0.0 {
            let nearest = self
                .sets
                .iter()
                .min_by(|a, b| {
                    (a.centroid - value)
                        .abs()
                        .total_cmp(&(b.centroid - value).abs())
                })
                .map(|s| s.label.clone())
                .unwrap_or_default();
            return Ok(vec![Membership {
                label: nearest,
                degree: 1.0,
            }]);
        }

        let mut memberships = Vec::new();
        for (i, (set, &degree)) in self.sets.iter().zip(&degrees).enumerate() {
            if degree > 0.0 && (i == best || degree > alpha_cut) {
                memberships.push(Membership {
                    label: set.label.clone(),
                    degree,
                });
            }
        }
        Ok(memberships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fitted(n: usize) -> GridPartitioner {
        let mut p = GridPartitioner::new(n).unwrap();
        // widened to [0, 110]
        p.fit(&[0.0, 50.0, 100.0]).unwrap();
        p
    }

    #[test]
    fn builds_evenly_spaced_sets() {
        let p = fitted(3);
        let centroids: Vec<f64> = p.sets().iter().map(|s| s.centroid).collect();
        assert_eq!(centroids.len(), 3);
        assert_relative_eq!(centroids[0], 0.0);
        assert_relative_eq!(centroids[1], 55.0, epsilon = 1e-9);
        assert_relative_eq!(centroids[2], 110.0, epsilon = 1e-9);
        let labels: Vec<&str> = p.sets().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A0", "A1", "A2"]);
    }

    #[test]
    fn fuzzify_returns_overlapping_sets() {
        let p = fitted(3);
        let m = p.fuzzify(27.5, 0.0).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].label, "A0");
        assert_relative_eq!(m[0].degree, 0.5, epsilon = 1e-9);
        assert_eq!(m[1].label, "A1");
    }

    #[test]
    fn alpha_cut_keeps_best_set() {
        let p = fitted(3);
        let m = p.fuzzify(20.0, 0.9).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].label, "A0");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = fitted(3);
        let m = p.fuzzify(500.0, 0.0).unwrap();
        assert_eq!(m, vec![Membership { label: "A2".into(), degree: 1.0 }]);
        let m = p.fuzzify(-500.0, 0.0).unwrap();
        assert_eq!(m[0].label, "A0");
    }

    #[test]
    fn constant_data_still_partitions() {
        let mut p = GridPartitioner::new(2).unwrap().with_prefix("L");
        p.fit(&[0.0, 0.0]).unwrap();
        assert_eq!(p.sets().len(), 2);
        assert_eq!(p.fuzzify(0.0, 0.0).unwrap().len(), 2);
        assert!(p.sets().get("L1").is_some());
    }

    #[test]
    fn errors_on_bad_input() {
        assert!(GridPartitioner::new(1).is_err());
        let mut p = GridPartitioner::new(3).unwrap();
        assert!(p.fuzzify(1.0, 0.0).is_err());
        assert_eq!(p.fit(&[]), Err(ForecastError::EmptyData));
        assert_eq!(p.fit(&[1.0, f64::NAN]), Err(ForecastError::MissingValues));
        assert!(!p.is_fitted());
    }
}
