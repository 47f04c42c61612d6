//! Fuzzy time series models.

mod flr;
mod flrg;
mod traits;
mod variable;
mod wmvfts;

pub use flr::{expand_lhs, generate_flrs, Flr, Lhs, LhsTerm};
pub use flrg::WeightedFlrg;
pub use traits::{BoxedFtsModel, FtsModel};
pub use variable::{Variable, VariableSource};
pub use wmvfts::{MissingPatternPolicy, ModelState, WeightedMVFTS, WeightedMVFTSConfig};
