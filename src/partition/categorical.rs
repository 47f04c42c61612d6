//! One crisp set per distinct value.

use super::{FuzzySet, FuzzySetTable, Membership, Partitioner};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Categorical partitioner for discrete values such as season components.
///
/// Every distinct observed value becomes a singleton set labeled with the
/// prefix followed by the value (`M3`, `H22`, ...). Values never observed
/// during fitting fuzzify to no label at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPartitioner {
    prefix: String,
    sets: FuzzySetTable,
}

impl CategoricalPartitioner {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sets: FuzzySetTable::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn label_of(&self, value: f64) -> String {
        format!("{}{}", self.prefix, canonical(value))
    }
}

/// Folds `-0.0` into `0.0` so both share one set and one label.
fn canonical(value: f64) -> f64 {
    value + 0.0
}

impl Default for CategoricalPartitioner {
    fn default() -> Self {
        Self::new("C")
    }
}

impl Partitioner for CategoricalPartitioner {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }

        let mut distinct: Vec<f64> = values.iter().map(|&v| canonical(v)).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();

        self.sets = distinct
            .into_iter()
            .map(|v| FuzzySet::singleton(self.label_of(v), v))
            .collect();
        Ok(())
    }

    fn sets(&self) -> &FuzzySetTable {
        &self.sets
    }

    fn fuzzify(&self, value: f64, _alpha_cut: f64) -> Result<Vec<Membership>> {
        if self.sets.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "categorical partitioner is not fitted".to_string(),
            ));
        }
        if !value.is_finite() {
            return Err(ForecastError::MissingValues);
        }

        Ok(self
            .sets
            .get(&self.label_of(value))
            .map(|set| Membership {
                label: set.label.clone(),
                degree: 1.0,
            })
            .into_iter()
            .collect())
    }
}
