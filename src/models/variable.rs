//! Model variables: where values come from and how they are fuzzified.

use crate::core::DataFrame;
use crate::error::{ForecastError, Result};
use crate::partition::{FuzzySetTable, Membership, Partitioner, PartitionerKind};
use crate::seasonal::{SeasonalIndexer, SeasonalIndexerKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Origin of a variable's raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VariableSource {
    /// A numeric column of the data frame.
    Column { field: String },
    /// One component of the season tuple produced by an indexer.
    Season {
        indexer: SeasonalIndexerKind,
        component: usize,
    },
}

/// A named input of a multivariate model with its own partitioner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    source: VariableSource,
    partitioner: PartitionerKind,
}

impl Variable {
    /// Variable read from a numeric column.
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        partitioner: impl Into<PartitionerKind>,
    ) -> Self {
        Self {
            name: name.into(),
            source: VariableSource::Column {
                field: field.into(),
            },
            partitioner: partitioner.into(),
        }
    }

    /// Variable read from component `component` of each row's season tuple.
    pub fn seasonal(
        name: impl Into<String>,
        indexer: impl Into<SeasonalIndexerKind>,
        component: usize,
        partitioner: impl Into<PartitionerKind>,
    ) -> Result<Self> {
        let indexer = indexer.into();
        if component >= indexer.num_seasons() {
            return Err(ForecastError::InvalidConfiguration(format!(
                "season component {} out of range for {} dimensions",
                component,
                indexer.num_seasons()
            )));
        }
        Ok(Self {
            name: name.into(),
            source: VariableSource::Season { indexer, component },
            partitioner: partitioner.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &VariableSource {
        &self.source
    }

    pub fn partitioner(&self) -> &PartitionerKind {
        &self.partitioner
    }

    /// Fuzzy sets learned for this variable.
    pub fn sets(&self) -> &FuzzySetTable {
        self.partitioner.sets()
    }

    pub fn is_fitted(&self) -> bool {
        self.partitioner.is_fitted()
    }

    /// Raw values of the variable, one per row.
    pub fn values(&self, data: &DataFrame) -> Result<Vec<f64>> {
        match &self.source {
            VariableSource::Column { field } => Ok(data.numeric(field)?.to_vec()),
            VariableSource::Season { indexer, component } => indexer
                .get_season_of_data(data)?
                .iter()
                .map(|season| {
                    season[*component].as_f64().ok_or_else(|| {
                        ForecastError::InvalidConfiguration(format!(
                            "season component {} of `{}` is not numeric",
                            component, self.name
                        ))
                    })
                })
                .collect(),
        }
    }

    /// Learn the variable's fuzzy sets from `data`.
    pub fn fit(&mut self, data: &DataFrame) -> Result<()> {
        let values = self.values(data)?;
        self.partitioner.fit(&values)?;
        debug!(
            variable = %self.name,
            sets = self.partitioner.sets().len(),
            "fitted partitioner"
        );
        Ok(())
    }

    /// Memberships of every row of `data`.
    pub fn fuzzify(&self, data: &DataFrame, alpha_cut: f64) -> Result<Vec<Vec<Membership>>> {
        self.values(data)?
            .into_iter()
            .map(|v| self.partitioner.fuzzify(v, alpha_cut))
            .collect()
    }
}
