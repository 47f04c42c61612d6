//! # fts-forecast
//!
//! Weighted multivariate fuzzy time series forecasting with seasonal indexing.
//!
//! Observations are mapped to season tuples by a seasonal indexer, fuzzified
//! per variable by a partitioner, and turned into fuzzy logical relationships
//! whose right-hand-side frequencies are aggregated per left-hand-side pattern.
//! Point forecasts are the frequency-weighted centroids of the matching groups.
//!
//! ```
//! use fts_forecast::prelude::*;
//! use fts_forecast::partition::CategoricalPartitioner;
//!
//! let data = DataFrame::builder()
//!     .numeric("y", vec![1.0, 1.0, 1.0, 2.0, 2.0, 1.0])
//!     .build()
//!     .unwrap();
//!
//! let y = Variable::new("y", "y", CategoricalPartitioner::new("y"));
//! let mut model = WeightedMVFTS::new(vec![y.clone()], y).unwrap();
//! model.train(&data).unwrap();
//!
//! let forecast = model.forecast(&data.slice(0, 1).unwrap()).unwrap();
//! assert!((forecast[0] - 4.0 / 3.0).abs() < 1e-9);
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod partition;
pub mod seasonal;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Column, DataFrame};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{FtsModel, Variable, WeightedMVFTS, WeightedMVFTSConfig};
    pub use crate::partition::{GridPartitioner, Partitioner};
    pub use crate::seasonal::{
        DataFrameSeasonalIndexer, DatePart, DateTimeSeasonalIndexer, LinearSeasonalIndexer,
        SeasonalIndexer,
    };
}
