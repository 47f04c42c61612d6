//! Core data structures for fuzzy time series forecasting.

mod frame;

pub use frame::{Column, DataFrame, DataFrameBuilder};
