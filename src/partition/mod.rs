//! Fuzzy-set partitioners.
//!
//! A partitioner learns a set of labeled fuzzy sets from observed values and
//! maps raw values to the labels they belong to. The forecasting models only
//! read labels and centroids and call [`Partitioner::fuzzify`].

mod categorical;
mod grid;
mod sets;

pub use categorical::CategoricalPartitioner;
pub use grid::GridPartitioner;
pub use sets::{FuzzySet, FuzzySetTable, MembershipFunction};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A fuzzy label with the membership degree of the value that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub label: String,
    pub degree: f64,
}

/// Learns fuzzy sets for one variable and fuzzifies its values.
pub trait Partitioner {
    /// Build the fuzzy sets from observed values.
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Fuzzy sets learned by `fit`.
    fn sets(&self) -> &FuzzySetTable;

    /// Labels whose membership degree for `value` exceeds `alpha_cut`, in set order.
    fn fuzzify(&self, value: f64, alpha_cut: f64) -> Result<Vec<Membership>>;

    fn is_fitted(&self) -> bool {
        !self.sets().is_empty()
    }
}

/// Closed set of partitioners a variable can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PartitionerKind {
    Grid(GridPartitioner),
    Categorical(CategoricalPartitioner),
}

impl PartitionerKind {
    fn inner(&self) -> &dyn Partitioner {
        match self {
            PartitionerKind::Grid(p) => p,
            PartitionerKind::Categorical(p) => p,
        }
    }
}

impl Partitioner for PartitionerKind {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        match self {
            PartitionerKind::Grid(p) => p.fit(values),
            PartitionerKind::Categorical(p) => p.fit(values),
        }
    }

    fn sets(&self) -> &FuzzySetTable {
        self.inner().sets()
    }

    fn fuzzify(&self, value: f64, alpha_cut: f64) -> Result<Vec<Membership>> {
        self.inner().fuzzify(value, alpha_cut)
    }
}

impl From<GridPartitioner> for PartitionerKind {
    fn from(p: GridPartitioner) -> Self {
        PartitionerKind::Grid(p)
    }
}

impl From<CategoricalPartitioner> for PartitionerKind {
    fn from(p: CategoricalPartitioner) -> Self {
        PartitionerKind::Categorical(p)
    }
}
