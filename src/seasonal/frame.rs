//! Seasons derived from named data frame columns.

use super::{filter_by_season, unsupported, Season, SeasonValue, SeasonalIndexer};
use crate::core::{Column, DataFrame};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Column-based seasonal indexer.
///
/// Each index field yields one season component: the raw column value when
/// its season length is `None`, otherwise `floor(value / length)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrameSeasonalIndexer {
    fields: Vec<String>,
    seasons: Vec<Option<u32>>,
    data_field: String,
}

impl DataFrameSeasonalIndexer {
    pub fn new(
        fields: Vec<String>,
        seasons: Vec<Option<u32>>,
        data_field: impl Into<String>,
    ) -> Result<Self> {
        if fields.len() != seasons.len() {
            return Err(ForecastError::InvalidConfiguration(format!(
                "{} season lengths configured for {} index fields",
                seasons.len(),
                fields.len()
            )));
        }
        if fields.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "at least one index field is required".to_string(),
            ));
        }
        if seasons.contains(&Some(0)) {
            return Err(ForecastError::InvalidConfiguration(
                "season lengths must be positive".to_string(),
            ));
        }
        Ok(Self {
            fields,
            seasons,
            data_field: data_field.into(),
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn seasons(&self) -> &[Option<u32>] {
        &self.seasons
    }

    pub fn data_field(&self) -> &str {
        &self.data_field
    }

    /// Season components of one index field, for every row.
    fn components(
        &self,
        data: &DataFrame,
        field: &str,
        season: Option<u32>,
    ) -> Result<Vec<SeasonValue>> {
        match (data.column(field)?, season) {
            (Column::Numeric(values), _) => values
                .iter()
                .map(|&v| numeric_component(field, v, season))
                .collect(),
            (Column::Text(values), None) => {
                Ok(values.iter().map(|v| SeasonValue::Text(v.clone())).collect())
            }
            (other, _) => Err(ForecastError::ColumnType {
                column: field.to_string(),
                expected: if season.is_some() { "numeric" } else { "numeric or text" },
                found: other.type_name(),
            }),
        }
    }
}

fn numeric_component(field: &str, value: f64, season: Option<u32>) -> Result<SeasonValue> {
    if !value.is_finite() {
        return Err(ForecastError::InvalidConfiguration(format!(
            "non-finite value in season field `{}`",
            field
        )));
    }
    match season {
        Some(len) => Ok(SeasonValue::Int((value / len as f64).floor() as i64)),
        None if value.fract() == 0.0 => Ok(SeasonValue::Int(value as i64)),
        None => Err(ForecastError::InvalidConfiguration(format!(
            "raw season field `{}` holds non-integral value {}",
            field, value
        ))),
    }
}

impl SeasonalIndexer for DataFrameSeasonalIndexer {
    fn name(&self) -> &'static str {
        "DataFrameSeasonalIndexer"
    }

    fn num_seasons(&self) -> usize {
        self.seasons.len()
    }

    fn get_season_of_data(&self, data: &DataFrame) -> Result<Vec<Season>> {
        let columns = self
            .fields
            .iter()
            .zip(&self.seasons)
            .map(|(field, &season)| self.components(data, field, season))
            .collect::<Result<Vec<_>>>()?;

        Ok((0..data.len())
            .map(|row| columns.iter().map(|c| c[row].clone()).collect())
            .collect())
    }

    fn get_season_by_index(&self, _index: usize) -> Result<Season> {
        Err(unsupported(self.name(), "get_season_by_index"))
    }

    fn get_index_by_season(&self, _season: &[SeasonValue]) -> Result<usize> {
        Err(unsupported(self.name(), "get_index_by_season"))
    }

    /// A row matches a query season only if every dimension matches.
    fn get_data_by_season(&self, data: &DataFrame, seasons: &[Season]) -> Result<DataFrame> {
        let all = self.get_season_of_data(data)?;
        filter_by_season(&all, data, seasons, &self.data_field)
    }

    fn get_data(&self, data: &DataFrame) -> Result<Vec<f64>> {
        Ok(data.numeric(&self.data_field)?.to_vec())
    }

    fn set_data(&self, data: DataFrame, values: Vec<f64>) -> Result<DataFrame> {
        data.with_column(&self.data_field, Column::Numeric(values))
    }
}
