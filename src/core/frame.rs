//! Tabular data structure with named, typed columns.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Values of a single named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
    DateTime(Vec<DateTime<Utc>>),
}

impl Column {
    /// Number of rows held by the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
            Column::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the value type, as reported by [`ForecastError::ColumnType`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
            Column::DateTime(_) => "datetime",
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&r| v[r]).collect()),
            Column::Text(v) => Column::Text(rows.iter().map(|&r| v[r].clone()).collect()),
            Column::DateTime(v) => Column::DateTime(rows.iter().map(|&r| v[r]).collect()),
        }
    }

    fn slice(&self, start: usize, end: usize) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(v[start..end].to_vec()),
            Column::Text(v) => Column::Text(v[start..end].to_vec()),
            Column::DateTime(v) => Column::DateTime(v[start..end].to_vec()),
        }
    }
}

/// Row-indexable table of equally long named columns.
///
/// Column order is preserved as given at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
    rows: usize,
}

/// Builder for constructing a DataFrame column by column.
#[derive(Debug, Clone, Default)]
pub struct DataFrameBuilder {
    columns: Vec<(String, Column)>,
}

impl DataFrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.push((name.into(), Column::Numeric(values)));
        self
    }

    pub fn text(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.columns.push((name.into(), Column::Text(values)));
        self
    }

    pub fn datetime(mut self, name: impl Into<String>, values: Vec<DateTime<Utc>>) -> Self {
        self.columns.push((name.into(), Column::DateTime(values)));
        self
    }

    pub fn build(self) -> Result<DataFrame> {
        DataFrame::new(self.columns)
    }
}

impl DataFrame {
    /// Create a frame, validating that names are unique and lengths agree.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

        for (i, (name, column)) in columns.iter().enumerate() {
            if column.len() != rows {
                return Err(ForecastError::DimensionMismatch {
                    expected: rows,
                    got: column.len(),
                });
            }
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "duplicate column name `{}`",
                    name
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn builder() -> DataFrameBuilder {
        DataFrameBuilder::new()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| ForecastError::ColumnNotFound(name.to_string()))
    }

    /// Values of a numeric column.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            other => Err(ForecastError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
                found: other.type_name(),
            }),
        }
    }

    /// Values of a text column.
    pub fn text(&self, name: &str) -> Result<&[String]> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            other => Err(ForecastError::ColumnType {
                column: name.to_string(),
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Values of a date/time column.
    pub fn datetimes(&self, name: &str) -> Result<&[DateTime<Utc>]> {
        match self.column(name)? {
            Column::DateTime(v) => Ok(v),
            other => Err(ForecastError::ColumnType {
                column: name.to_string(),
                expected: "datetime",
                found: other.type_name(),
            }),
        }
    }

    /// Keep only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<DataFrame> {
        let columns = names
            .iter()
            .map(|&name| Ok((name.to_string(), self.column(name)?.clone())))
            .collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Keep only the given rows, in the given order.
    pub fn take(&self, rows: &[usize]) -> Result<DataFrame> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.rows) {
            return Err(ForecastError::InsufficientData {
                needed: bad + 1,
                got: self.rows,
            });
        }
        Ok(DataFrame {
            columns: self
                .columns
                .iter()
                .map(|(name, c)| (name.clone(), c.take(rows)))
                .collect(),
            rows: rows.len(),
        })
    }

    /// Contiguous rows `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<DataFrame> {
        if start > end || end > self.rows {
            return Err(ForecastError::InsufficientData {
                needed: end,
                got: self.rows,
            });
        }
        Ok(DataFrame {
            columns: self
                .columns
                .iter()
                .map(|(name, c)| (name.clone(), c.slice(start, end)))
                .collect(),
            rows: end - start,
        })
    }

    /// Replace the named column, or append it when absent.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<DataFrame> {
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(ForecastError::DimensionMismatch {
                expected: self.rows,
                got: column.len(),
            });
        }
        self.rows = column.len();
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name.to_string(), column)),
        }
        Ok(self)
    }
}
