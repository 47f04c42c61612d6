//! Seasons derived from date/time parts.

use super::{unsupported, Season, SeasonValue, SeasonalIndexer};
use crate::core::DataFrame;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date/time part extracted as a season component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    /// Monday is 0.
    DayOfWeek,
    Hour,
    Minute,
    Second,
}

type Extractor = fn(&DateTime<Utc>) -> i64;

// Indexed by `DatePart as usize`.
const EXTRACTORS: [Extractor; 8] = [
    |d| d.year() as i64,
    |d| d.month() as i64,
    |d| d.day() as i64,
    |d| d.ordinal() as i64,
    |d| d.weekday().num_days_from_monday() as i64,
    |d| d.hour() as i64,
    |d| d.minute() as i64,
    |d| d.second() as i64,
];

impl DatePart {
    pub const ALL: [DatePart; 8] = [
        DatePart::Year,
        DatePart::Month,
        DatePart::DayOfMonth,
        DatePart::DayOfYear,
        DatePart::DayOfWeek,
        DatePart::Hour,
        DatePart::Minute,
        DatePart::Second,
    ];

    /// Extract the part, floor-divided by `resolution` when given.
    pub fn extract(self, date: &DateTime<Utc>, resolution: Option<u32>) -> i64 {
        let value = EXTRACTORS[self as usize](date);
        match resolution {
            Some(r) => value.div_euclid(r as i64),
            None => value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Month => "month",
            DatePart::DayOfMonth => "day_of_month",
            DatePart::DayOfYear => "day_of_year",
            DatePart::DayOfWeek => "day_of_week",
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
        }
    }
}

impl FromStr for DatePart {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        DatePart::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ForecastError::InvalidConfiguration(format!("unknown date part `{}`", s))
            })
    }
}

/// Date/time seasonal indexer.
///
/// Reverse lookup, season filtering and data replacement are not available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeSeasonalIndexer {
    date_field: String,
    parts: Vec<DatePart>,
    resolutions: Vec<Option<u32>>,
    data_field: String,
}

impl DateTimeSeasonalIndexer {
    pub fn new(
        date_field: impl Into<String>,
        parts: Vec<DatePart>,
        resolutions: Vec<Option<u32>>,
        data_field: impl Into<String>,
    ) -> Result<Self> {
        if parts.len() != resolutions.len() {
            return Err(ForecastError::InvalidConfiguration(format!(
                "{} resolutions configured for {} date parts",
                resolutions.len(),
                parts.len()
            )));
        }
        if parts.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "at least one date part is required".to_string(),
            ));
        }
        if resolutions.contains(&Some(0)) {
            return Err(ForecastError::InvalidConfiguration(
                "resolutions must be positive".to_string(),
            ));
        }
        let date_field = date_field.into();
        if date_field.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "date field name is empty".to_string(),
            ));
        }
        Ok(Self {
            date_field,
            parts,
            resolutions,
            data_field: data_field.into(),
        })
    }

    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    pub fn parts(&self) -> &[DatePart] {
        &self.parts
    }

    pub fn resolutions(&self) -> &[Option<u32>] {
        &self.resolutions
    }

    pub fn data_field(&self) -> &str {
        &self.data_field
    }

    /// Season tuple of a single date.
    pub fn season_of_date(&self, date: &DateTime<Utc>) -> Season {
        self.parts
            .iter()
            .zip(&self.resolutions)
            .map(|(part, &res)| SeasonValue::Int(part.extract(date, res)))
            .collect()
    }
}

impl SeasonalIndexer for DateTimeSeasonalIndexer {
    fn name(&self) -> &'static str {
        "DateTimeSeasonalIndexer"
    }

    fn num_seasons(&self) -> usize {
        self.parts.len()
    }

    fn get_season_of_data(&self, data: &DataFrame) -> Result<Vec<Season>> {
        let dates = data.datetimes(&self.date_field).map_err(|e| {
            ForecastError::InvalidConfiguration(format!(
                "malformed date field `{}`: {}",
                self.date_field, e
            ))
        })?;
        Ok(dates.iter().map(|d| self.season_of_date(d)).collect())
    }

    fn get_season_by_index(&self, _index: usize) -> Result<Season> {
        Err(unsupported(self.name(), "get_season_by_index"))
    }

    fn get_index_by_season(&self, _season: &[SeasonValue]) -> Result<usize> {
        Err(unsupported(self.name(), "get_index_by_season"))
    }

    fn get_data_by_season(&self, _data: &DataFrame, _seasons: &[Season]) -> Result<DataFrame> {
        Err(unsupported(self.name(), "get_data_by_season"))
    }

    fn get_data(&self, data: &DataFrame) -> Result<Vec<f64>> {
        Ok(data.numeric(&self.data_field)?.to_vec())
    }

    fn set_data(&self, _data: DataFrame, _values: Vec<f64>) -> Result<DataFrame> {
        Err(unsupported(self.name(), "set_data"))
    }
}
