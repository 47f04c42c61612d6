//! Seasonal indexing of observations.
//!
//! A seasonal indexer maps every row of a data set to a season tuple, one
//! component per configured seasonal dimension, and can select rows by season:
//! - [`LinearSeasonalIndexer`]: seasons from the flat row position
//! - [`DataFrameSeasonalIndexer`]: seasons from named numeric or text columns
//! - [`DateTimeSeasonalIndexer`]: seasons from date parts of a date/time column
//!
//! Variants that cannot support an operation return
//! [`ForecastError::UnsupportedOperation`] instead of doing nothing.

mod datetime;
mod frame;
mod linear;

pub use datetime::{DatePart, DateTimeSeasonalIndexer};
pub use frame::DataFrameSeasonalIndexer;
pub use linear::LinearSeasonalIndexer;

use crate::core::DataFrame;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One component of a season tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonValue {
    Int(i64),
    Text(String),
}

impl SeasonValue {
    /// Numeric view of the component, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SeasonValue::Int(v) => Some(*v as f64),
            SeasonValue::Text(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SeasonValue::Int(v) => Some(*v),
            SeasonValue::Text(_) => None,
        }
    }
}

impl From<i64> for SeasonValue {
    fn from(v: i64) -> Self {
        SeasonValue::Int(v)
    }
}

impl From<&str> for SeasonValue {
    fn from(v: &str) -> Self {
        SeasonValue::Text(v.to_string())
    }
}

impl fmt::Display for SeasonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonValue::Int(v) => write!(f, "{}", v),
            SeasonValue::Text(v) => f.write_str(v),
        }
    }
}

/// Ordered season components, one per seasonal dimension.
pub type Season = Vec<SeasonValue>;

/// Capability interface shared by all seasonal indexers.
pub trait SeasonalIndexer {
    /// Variant name, used in error messages.
    fn name(&self) -> &'static str;

    /// Number of seasonal dimensions.
    fn num_seasons(&self) -> usize;

    /// Season tuple of every row, in row order.
    fn get_season_of_data(&self, data: &DataFrame) -> Result<Vec<Season>>;

    /// Season tuple of a flat row position.
    fn get_season_by_index(&self, index: usize) -> Result<Season>;

    /// Flat row position of a season tuple.
    ///
    /// With several seasons this is the mixed-radix sum `sum(season[k] * L_k)`.
    /// A single-season linear indexer returns the component itself, the
    /// position within the first cycle, so the round trip with
    /// `get_season_by_index` holds only for positions in `0..L`.
    fn get_index_by_season(&self, season: &[SeasonValue]) -> Result<usize>;

    /// Data column of the rows whose season equals one of `seasons`.
    fn get_data_by_season(&self, data: &DataFrame, seasons: &[Season]) -> Result<DataFrame>;

    /// Values of the data column, without index fields.
    fn get_data(&self, data: &DataFrame) -> Result<Vec<f64>>;

    /// Replace the data column with `values`.
    fn set_data(&self, data: DataFrame, values: Vec<f64>) -> Result<DataFrame>;
}

pub(crate) fn unsupported(indexer: &'static str, operation: &'static str) -> ForecastError {
    ForecastError::UnsupportedOperation { indexer, operation }
}

pub(crate) fn check_season_len(expected: usize, season: &[SeasonValue]) -> Result<()> {
    if season.len() != expected {
        return Err(ForecastError::DimensionMismatch {
            expected,
            got: season.len(),
        });
    }
    Ok(())
}

/// Rows of `data` whose season matches any of `seasons`, restricted to `data_field`.
pub(crate) fn filter_by_season(
    all: &[Season],
    data: &DataFrame,
    seasons: &[Season],
    data_field: &str,
) -> Result<DataFrame> {
    let rows: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, s)| seasons.iter().any(|q| q == *s))
        .map(|(i, _)| i)
        .collect();
    data.take(&rows)?.select(&[data_field])
}

/// Closed set of indexer variants, usable wherever the concrete kind is
/// decided at runtime or must be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SeasonalIndexerKind {
    Linear(LinearSeasonalIndexer),
    DataFrame(DataFrameSeasonalIndexer),
    DateTime(DateTimeSeasonalIndexer),
}

impl SeasonalIndexerKind {
    fn inner(&self) -> &dyn SeasonalIndexer {
        match self {
            SeasonalIndexerKind::Linear(i) => i,
            SeasonalIndexerKind::DataFrame(i) => i,
            SeasonalIndexerKind::DateTime(i) => i,
        }
    }
}

impl SeasonalIndexer for SeasonalIndexerKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn num_seasons(&self) -> usize {
        self.inner().num_seasons()
    }

    fn get_season_of_data(&self, data: &DataFrame) -> Result<Vec<Season>> {
        self.inner().get_season_of_data(data)
    }

    fn get_season_by_index(&self, index: usize) -> Result<Season> {
        self.inner().get_season_by_index(index)
    }

    fn get_index_by_season(&self, season: &[SeasonValue]) -> Result<usize> {
        self.inner().get_index_by_season(season)
    }

    fn get_data_by_season(&self, data: &DataFrame, seasons: &[Season]) -> Result<DataFrame> {
        self.inner().get_data_by_season(data, seasons)
    }

    fn get_data(&self, data: &DataFrame) -> Result<Vec<f64>> {
        self.inner().get_data(data)
    }

    fn set_data(&self, data: DataFrame, values: Vec<f64>) -> Result<DataFrame> {
        self.inner().set_data(data, values)
    }
}

impl From<LinearSeasonalIndexer> for SeasonalIndexerKind {
    fn from(i: LinearSeasonalIndexer) -> Self {
        SeasonalIndexerKind::Linear(i)
    }
}

impl From<DataFrameSeasonalIndexer> for SeasonalIndexerKind {
    fn from(i: DataFrameSeasonalIndexer) -> Self {
        SeasonalIndexerKind::DataFrame(i)
    }
}

impl From<DateTimeSeasonalIndexer> for SeasonalIndexerKind {
    fn from(i: DateTimeSeasonalIndexer) -> Self {
        SeasonalIndexerKind::DateTime(i)
    }
}
