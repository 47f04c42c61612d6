//! Seasons derived from the flat row position.

use super::{check_season_len, filter_by_season, Season, SeasonValue, SeasonalIndexer};
use crate::core::{Column, DataFrame};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Linear seasonal indexer.
///
/// With a single season length `L`, the season of position `i` is `i % L`.
/// With several lengths, every component is `i / L_k`; each dimension
/// coarsens the position further rather than partitioning a remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSeasonalIndexer {
    seasons: Vec<usize>,
    data_field: String,
}

impl LinearSeasonalIndexer {
    pub fn new(seasons: Vec<usize>, data_field: impl Into<String>) -> Result<Self> {
        if seasons.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "at least one season length is required".to_string(),
            ));
        }
        if seasons.iter().any(|&s| s == 0) {
            return Err(ForecastError::InvalidConfiguration(
                "season lengths must be positive".to_string(),
            ));
        }
        Ok(Self {
            seasons,
            data_field: data_field.into(),
        })
    }

    pub fn seasons(&self) -> &[usize] {
        &self.seasons
    }

    pub fn data_field(&self) -> &str {
        &self.data_field
    }

    /// Season tuples for positions `0..len`.
    pub fn seasons_of_len(&self, len: usize) -> Vec<Season> {
        (0..len).map(|i| self.season_at(i)).collect()
    }

    fn season_at(&self, index: usize) -> Season {
        if self.seasons.len() == 1 {
            vec![SeasonValue::Int((index % self.seasons[0]) as i64)]
        } else {
            self.seasons
                .iter()
                .map(|&s| SeasonValue::Int((index / s) as i64))
                .collect()
        }
    }
}

impl SeasonalIndexer for LinearSeasonalIndexer {
    fn name(&self) -> &'static str {
        "LinearSeasonalIndexer"
    }

    fn num_seasons(&self) -> usize {
        self.seasons.len()
    }

    fn get_season_of_data(&self, data: &DataFrame) -> Result<Vec<Season>> {
        Ok(self.seasons_of_len(data.len()))
    }

    fn get_season_by_index(&self, index: usize) -> Result<Season> {
        Ok(self.season_at(index))
    }

    /// In single-season mode the position within the cycle is returned, which
    /// inverts `get_season_by_index` on `0..L`. In multi-season mode the index
    /// is the mixed-radix sum `sum(season[k] * L_k)`.
    fn get_index_by_season(&self, season: &[SeasonValue]) -> Result<usize> {
        check_season_len(self.seasons.len(), season)?;

        let components = season
            .iter()
            .map(|v| match v.as_int() {
                Some(c) if c >= 0 => Ok(c as usize),
                _ => Err(ForecastError::InvalidConfiguration(format!(
                    "linear season component must be a non-negative integer, got {}",
                    v
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        if self.seasons.len() == 1 {
            return Ok(components[0]);
        }
        Ok(components
            .iter()
            .zip(&self.seasons)
            .map(|(c, s)| c * s)
            .sum())
    }

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
