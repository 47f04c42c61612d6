//! Common interface of fuzzy time series models.

use crate::core::DataFrame;
use crate::error::Result;

/// Published surface of a fuzzy time series model.
///
/// This trait is object-safe and can be used with `Box<dyn FtsModel>`.
pub trait FtsModel {
    /// Learn partitions and fuzzy relationships from the training data.
    fn train(&mut self, data: &DataFrame) -> Result<()>;

    /// One point forecast per window of `order()` consecutive rows.
    fn forecast(&self, data: &DataFrame) -> Result<Vec<f64>>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Short identifier used in reports.
    fn short_name(&self) -> &str;

    /// Number of lagged positions read by each relationship.
    fn order(&self) -> usize;

    /// Check if the model has been trained.
    fn is_trained(&self) -> bool;
}

/// Type alias for boxed model trait objects.
///
/// # Example
///
/// ```
/// use fts_forecast::models::{BoxedFtsModel, Variable, WeightedMVFTS};
/// use fts_forecast::partition::GridPartitioner;
///
/// let load = Variable::new("load", "load", GridPartitioner::new(5).unwrap());
/// let model: BoxedFtsModel = Box::new(WeightedMVFTS::new(vec![load.clone()], load).unwrap());
/// assert_eq!(model.short_name(), "WeightedMVFTS");
/// assert!(!model.is_trained());
/// ```
pub type BoxedFtsModel = Box<dyn FtsModel>;
