//! Fuzzy sets and label lookup.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Membership function of a fuzzy set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MembershipFunction {
    /// μ(x) = max(min((x-a)/(b-a), (c-x)/(c-b)), 0)
    Triangular { a: f64, b: f64, c: f64 },
    /// Crisp set containing a single value.
    Singleton { value: f64 },
}

impl MembershipFunction {
    pub fn membership(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x <= a || x >= c {
                    0.0
                } else if x <= b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Singleton { value } => {
                if (x - value).abs() < 1e-10 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Labeled region of a variable's value range with a representative centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    pub label: String,
    pub centroid: f64,
    pub function: MembershipFunction,
}

impl FuzzySet {
    pub fn new(label: impl Into<String>, centroid: f64, function: MembershipFunction) -> Self {
        Self {
            label: label.into(),
            centroid,
            function,
        }
    }

    /// Triangular set peaking at `b`.
    pub fn triangular(label: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self::new(label, b, MembershipFunction::Triangular { a, b, c })
    }

    pub fn singleton(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, MembershipFunction::Singleton { value })
    }

    pub fn membership(&self, x: f64) -> f64 {
        self.function.membership(x)
    }
}

/// Ordered collection of fuzzy sets addressable by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FuzzySet>", into = "Vec<FuzzySet>")]
pub struct FuzzySetTable {
    sets: Vec<FuzzySet>,
    by_label: HashMap<String, usize>,
}

impl FuzzySetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a set, replacing any set with the same label.
    pub fn insert(&mut self, set: FuzzySet) {
        match self.by_label.get(&set.label) {
            Some(&i) => self.sets[i] = set,
            None => {
                self.by_label.insert(set.label.clone(), self.sets.len());
                self.sets.push(set);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&FuzzySet> {
        self.by_label.get(label).map(|&i| &self.sets[i])
    }

    /// Centroid of the labeled set.
    pub fn centroid(&self, label: &str) -> Result<f64> {
        self.get(label)
            .map(|s| s.centroid)
            .ok_or_else(|| ForecastError::UnknownLabel(label.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuzzySet> {
        self.sets.iter()
    }
}

impl From<Vec<FuzzySet>> for FuzzySetTable {
    fn from(sets: Vec<FuzzySet>) -> Self {
        let mut table = FuzzySetTable::new();
        for set in sets {
            table.insert(set);
        }
        table
    }
}

impl From<FuzzySetTable> for Vec<FuzzySet> {
    fn from(table: FuzzySetTable) -> Self {
        table.sets
    }
}

impl FromIterator<FuzzySet> for FuzzySetTable {
    fn from_iter<I: IntoIterator<Item = FuzzySet>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}
