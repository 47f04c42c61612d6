//! Weighted fuzzy logical relationship groups.

use super::flr::Lhs;
use crate::error::{ForecastError, Result};
use crate::partition::FuzzySetTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// All observed transitions sharing one LHS pattern.
///
/// RHS labels keep first-seen order and carry their observed frequency.
/// `count` always equals the sum of the frequencies. Normalized weights are
/// computed lazily and dropped on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedFlrg {
    lhs: Lhs,
    order: usize,
    rhs: Vec<(String, f64)>,
    count: f64,
    #[serde(skip)]
    weights: OnceLock<Vec<f64>>,
}

impl WeightedFlrg {
    pub fn new(lhs: Lhs, order: usize) -> Self {
        Self {
            lhs,
            order,
            rhs: Vec::new(),
            count: 0.0,
            weights: OnceLock::new(),
        }
    }

    pub fn lhs(&self) -> &Lhs {
        &self.lhs
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Canonical key of the LHS pattern.
    pub fn key(&self) -> String {
        self.lhs.key()
    }

    /// Total number of RHS observations.
    pub fn count(&self) -> f64 {
        self.count
    }

    /// RHS labels with their frequencies, in first-seen order.
    pub fn rhs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rhs.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn frequency(&self, label: &str) -> Option<f64> {
        self.rhs.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    /// Record one more observation of `label` following this pattern.
    pub fn append_rhs(&mut self, label: &str) {
        match self.rhs.iter_mut().find(|(l, _)| l == label) {
            Some((_, c)) => *c += 1.0,
            None => self.rhs.push((label.to_string(), 1.0)),
        }
        self.count += 1.0;
        self.weights = OnceLock::new();
    }

    /// Frequencies normalized by `count`, aligned with [`WeightedFlrg::rhs`].
    pub fn weights(&self) -> &[f64] {
        self.weights.get_or_init(|| {
            if self.count <= 0.0 {
                return Vec::new();
            }
            self.rhs.iter().map(|(_, c)| c / self.count).collect()
        })
    }

    /// Weighted centroid of the RHS labels.
    pub fn get_midpoint(&self, sets: &FuzzySetTable) -> Result<f64> {
        if self.rhs.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        self.rhs
            .iter()
            .zip(self.weights())
            .map(|((label, _), w)| -> Result<f64> { Ok(sets.centroid(label)? * w) })
            .sum()
    }
}

impl fmt::Display for WeightedFlrg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rhs = self
            .rhs
            .iter()
            .zip(self.weights())
            .map(|((label, _), w)| format!("{} ({:.3})", label, w))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} -> {}", self.key(), rhs)
    }
}
