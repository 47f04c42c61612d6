//! Weighted multivariate fuzzy time series.
//!
//! Training fuzzifies every explanatory variable, slides a window of `order`
//! positions over the data and folds each resulting relationship into a
//! [`WeightedFlrg`] keyed by its LHS pattern. Forecasting rebuilds the same
//! patterns for a new window and returns the weighted centroid of the
//! matching groups.

use super::flr::{expand_lhs, generate_flrs};
use super::flrg::WeightedFlrg;
use super::traits::FtsModel;
use super::variable::Variable;
use crate::core::DataFrame;
use crate::error::{ForecastError, Result};
use crate::partition::Membership;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, trace};

/// What to forecast when no group matches the window's pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPatternPolicy {
    /// Fail with [`ForecastError::UnknownPattern`].
    #[default]
    Fail,
    /// Repeat the last raw target value of the window.
    Persistence,
}

/// Configuration of a [`WeightedMVFTS`] model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedMVFTSConfig {
    /// Number of lagged positions in each LHS pattern.
    pub order: usize,
    /// Memberships at or below this degree are ignored when fuzzifying.
    pub alpha_cut: f64,
    pub missing_pattern: MissingPatternPolicy,
}

impl Default for WeightedMVFTSConfig {
    fn default() -> Self {
        Self {
            order: 1,
            alpha_cut: 0.0,
            missing_pattern: MissingPatternPolicy::Fail,
        }
    }
}

impl WeightedMVFTSConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_alpha_cut(mut self, alpha_cut: f64) -> Self {
        self.alpha_cut = alpha_cut;
        self
    }

    pub fn with_missing_pattern(mut self, policy: MissingPatternPolicy) -> Self {
        self.missing_pattern = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "order must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.alpha_cut) {
            return Err(ForecastError::InvalidConfiguration(format!(
                "alpha cut must be in [0, 1), got {}",
                self.alpha_cut
            )));
        }
        Ok(())
    }
}

/// Lifecycle of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    #[default]
    Unfitted,
    /// Partitioners learned, no relationship groups yet.
    Fitted,
    Trained,
}

/// Weighted multivariate fuzzy time series model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedMVFTS {
    config: WeightedMVFTSConfig,
    explanatory_variables: Vec<Variable>,
    target_variable: Variable,
    flrgs: HashMap<String, WeightedFlrg>,
    state: ModelState,
}

impl WeightedMVFTS {
    /// Create an untrained model with the default configuration.
    ///
    /// The target may also appear among the explanatory variables.
    pub fn new(explanatory_variables: Vec<Variable>, target_variable: Variable) -> Result<Self> {
        if explanatory_variables.is_empty() {
            return Err(ForecastError::InvalidConfiguration(
                "at least one explanatory variable is required".to_string(),
            ));
        }
        for (i, v) in explanatory_variables.iter().enumerate() {
            if explanatory_variables[..i].iter().any(|o| o.name() == v.name()) {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "duplicate variable name `{}`",
                    v.name()
                )));
            }
        }
        Ok(Self {
            config: WeightedMVFTSConfig::default(),
            explanatory_variables,
            target_variable,
            flrgs: HashMap::new(),
            state: ModelState::Unfitted,
        })
    }

    pub fn with_config(mut self, config: WeightedMVFTSConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WeightedMVFTSConfig {
        &self.config
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn explanatory_variables(&self) -> &[Variable] {
        &self.explanatory_variables
    }

    pub fn target_variable(&self) -> &Variable {
        &self.target_variable
    }

    /// Relationship groups keyed by canonical LHS key.
    pub fn flrgs(&self) -> &HashMap<String, WeightedFlrg> {
        &self.flrgs
    }

    pub fn flrg(&self, key: &str) -> Option<&WeightedFlrg> {
        self.flrgs.get(key)
    }

    /// Number of relationship groups.
    pub fn len(&self) -> usize {
        self.flrgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flrgs.is_empty()
    }

    /// Learn every variable's partitioner, leaving the group table empty.
    ///
    /// On failure the model keeps its previous variables and state.
    pub fn fit(&mut self, data: &DataFrame) -> Result<()> {
        let (explanatory, target) = self.fitted_variables(data)?;
        self.explanatory_variables = explanatory;
        self.target_variable = target;
        self.flrgs.clear();
        self.state = ModelState::Fitted;
        Ok(())
    }

    fn fitted_variables(&self, data: &DataFrame) -> Result<(Vec<Variable>, Variable)> {
        if data.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        let mut explanatory = self.explanatory_variables.clone();
        for variable in &mut explanatory {
            variable.fit(data)?;
        }
        let mut target = self.target_variable.clone();
        target.fit(data)?;
        Ok((explanatory, target))
    }

    /// Fold relationships into a fresh group table.
    fn build_flrgs(
        &self,
        explanatory: &[Variable],
        target: &Variable,
        data: &DataFrame,
    ) -> Result<(HashMap<String, WeightedFlrg>, usize)> {
        let order = self.config.order;
        let fuzzified = explanatory
            .iter()
            .map(|v| Ok((v.name(), v.fuzzify(data, self.config.alpha_cut)?)))
            .collect::<Result<Vec<_>>>()?;
        let target_labels = target.fuzzify(data, self.config.alpha_cut)?;

        let flrs = generate_flrs(&fuzzified, &target_labels, order);
        let mut flrgs: HashMap<String, WeightedFlrg> = HashMap::new();
        for flr in &flrs {
            flrgs
                .entry(flr.lhs.key())
                .or_insert_with(|| WeightedFlrg::new(flr.lhs.clone(), order))
                .append_rhs(&flr.rhs);
        }
        Ok((flrgs, flrs.len()))
    }

    /// Fuzzified explanatory variables of `data`, in declaration order.
    fn fuzzify_explanatory<'a>(
        &'a self,
        data: &DataFrame,
    ) -> Result<Vec<(&'a str, Vec<Vec<Membership>>)>> {
        self.explanatory_variables
            .iter()
            .map(|v| Ok((v.name(), v.fuzzify(data, self.config.alpha_cut)?)))
            .collect()
    }

    /// Membership-weighted mean of the midpoints of every matching group.
    fn point_forecast(&self, window: &[(&str, &[Vec<Membership>])]) -> Result<Option<f64>> {
        let candidates = expand_lhs(window);
        let sets = self.target_variable.sets();

        let mut weighted = 0.0;
        let mut total = 0.0;
        let mut matched = 0usize;
        for (lhs, degree) in &candidates {
            if let Some(flrg) = self.flrgs.get(&lhs.key()) {
                weighted += degree * flrg.get_midpoint(sets)?;
                total += degree;
                matched += 1;
            }
        }
        trace!(candidates = candidates.len(), matched, "resolved window");

        if matched == 0 || total <= 0.0 {
            return Ok(None);
        }
        Ok(Some(weighted / total))
    }

    fn missing_pattern(
        &self,
        window: &[(&str, &[Vec<Membership>])],
        last_target: Option<f64>,
    ) -> Result<f64> {
        match (self.config.missing_pattern, last_target) {
            (MissingPatternPolicy::Persistence, Some(value)) => {
                debug!(value, "no matching group, using persistence");
                Ok(value)
            }
            _ => {
                let key = expand_lhs(window)
                    .first()
                    .map(|(lhs, _)| lhs.key())
                    .unwrap_or_else(|| "<unfuzzifiable window>".to_string());
                Err(ForecastError::UnknownPattern(key))
            }
        }
    }

    /// Serialize the trained model, including the group table.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FtsModel for WeightedMVFTS {
    /// On failure nothing is committed: variables, groups and state stay as
    /// they were before the call.
    fn train(&mut self, data: &DataFrame) -> Result<()> {
        self.config.validate()?;
        let order = self.config.order;
        if data.len() <= order {
            return Err(ForecastError::InsufficientData {
                needed: order + 1,
                got: data.len(),
            });
        }

        let (explanatory, target) = self.fitted_variables(data)?;
        let (flrgs, relationships) = self.build_flrgs(&explanatory, &target, data)?;

        self.explanatory_variables = explanatory;
        self.target_variable = target;
        self.flrgs = flrgs;
        self.state = ModelState::Trained;

        info!(
            model = self.short_name(),
            order,
            relationships,
            groups = self.flrgs.len(),
            "trained model"
        );
        Ok(())
    }

    /// Forecasts follow the windows `k-order..k` for `k` in `order..=len`.
    fn forecast(&self, data: &DataFrame) -> Result<Vec<f64>> {
        if self.state != ModelState::Trained {
            return Err(ForecastError::ModelNotTrained);
        }
        let order = self.config.order;
        if data.len() < order {
            return Err(ForecastError::InsufficientData {
                needed: order,
                got: data.len(),
            });
        }

        let fuzzified = self.fuzzify_explanatory(data)?;
        let target_values = match self.config.missing_pattern {
            MissingPatternPolicy::Persistence => Some(self.target_variable.values(data)?),
            MissingPatternPolicy::Fail => None,
        };

        (order..=data.len())
            .map(|k| {
                let window: Vec<(&str, &[Vec<Membership>])> = fuzzified
                    .iter()
                    .map(|(name, seq)| (*name, &seq[k - order..k]))
                    .collect();
                match self.point_forecast(&window)? {
                    Some(value) => Ok(value),
                    None => {
                        let last = target_values.as_ref().map(|v| v[k - 1]);
                        self.missing_pattern(&window, last)
                    }
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "Weighted Multivariate FTS"
    }

    fn short_name(&self) -> &str {
        "WeightedMVFTS"
    }

    fn order(&self) -> usize {
        self.config.order
    }

    fn is_trained(&self) -> bool {
        self.state == ModelState::Trained
    }
}

impl fmt::Display for WeightedMVFTS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name())?;
        let mut keys: Vec<&String> = self.flrgs.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(f, "{}", self.flrgs[key])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{CategoricalPartitioner, FuzzySet, GridPartitioner};
    use approx::assert_relative_eq;

    fn frame(values: &[f64]) -> DataFrame {
        DataFrame::builder()
            .numeric("y", values.to_vec())
            .build()
            .unwrap()
    }

    fn categorical_model(order: usize) -> WeightedMVFTS {
        let y = Variable::new("y", "y", CategoricalPartitioner::new("y"));
        WeightedMVFTS::new(vec![y.clone()], y)
            .unwrap()
            .with_config(WeightedMVFTSConfig::new().with_order(order))
    }

    #[test]
    fn aggregates_transitions_by_pattern() {
        // pattern 1 is followed by 1, 1 and 2
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 1.0, 1.0, 2.0, 2.0, 1.0])).unwrap();

        let group = model.flrg("y:y1").unwrap();
        let rhs: Vec<(&str, f64)> = group.rhs().collect();
        assert_eq!(rhs, vec![("y1", 2.0), ("y2", 1.0)]);
        assert_relative_eq!(group.weights()[0], 2.0 / 3.0);

        let sets: crate::partition::FuzzySetTable = vec![
            FuzzySet::singleton("y1", 10.0),
            FuzzySet::singleton("y2", 20.0),
        ]
        .into();
        assert_relative_eq!(group.get_midpoint(&sets).unwrap(), 40.0 / 3.0, epsilon = 1e-9);
        assert_eq!(model.flrg("y:y2").unwrap().count(), 2.0);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn forecasts_weighted_centroid_per_window() {
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 1.0, 1.0, 2.0, 2.0, 1.0])).unwrap();

        let forecast = model.forecast(&frame(&[1.0, 2.0])).unwrap();
        assert_eq!(forecast.len(), 2);
        // 1 -> {1: 2/3, 2: 1/3}
        assert_relative_eq!(forecast[0], 4.0 / 3.0, epsilon = 1e-9);
        // 2 -> {1: 1/2, 2: 1/2}
        assert_relative_eq!(forecast[1], 1.5, epsilon = 1e-9);
    }

    #[test]
    fn higher_order_patterns() {
        let mut model = categorical_model(2);
        model.train(&frame(&[1.0, 2.0, 3.0, 1.0, 2.0, 3.0])).unwrap();

        assert_eq!(model.flrg("y:y1,y2").unwrap().frequency("y3"), Some(2.0));
        let forecast = model.forecast(&frame(&[2.0, 3.0])).unwrap();
        assert_eq!(forecast, vec![1.0]);
    }

    #[test]
    fn unknown_pattern_fails_by_default() {
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 2.0, 3.0])).unwrap();

        // 3 only appears as the last observation
        assert_eq!(
            model.forecast(&frame(&[3.0])),
            Err(ForecastError::UnknownPattern("y:y3".to_string()))
        );

        // 5 was never observed at all
        assert!(matches!(
            model.forecast(&frame(&[5.0])),
            Err(ForecastError::UnknownPattern(_))
        ));
    }

    #[test]
    fn signed_zero_keeps_every_relationship() {
        let mut model = categorical_model(1);
        model
            .train(&frame(&[-0.0, 1.0, 0.0, 1.0, 0.0, 1.0]))
            .unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.flrg("y:y0").unwrap().frequency("y1"), Some(3.0));
        assert_eq!(model.flrg("y:y1").unwrap().frequency("y0"), Some(2.0));
        assert_eq!(model.forecast(&frame(&[0.0])).unwrap(), vec![1.0]);
    }

    #[test]
    fn persistence_policy_repeats_last_value() {
        let mut model = categorical_model(1).with_config(
            WeightedMVFTSConfig::new().with_missing_pattern(MissingPatternPolicy::Persistence),
        );
        model.train(&frame(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(model.forecast(&frame(&[1.0, 3.0])).unwrap(), vec![2.0, 3.0]);
    }

    #[test]
    fn forecasting_requires_training() {
        let model = categorical_model(1);
        assert_eq!(
            model.forecast(&frame(&[1.0])),
            Err(ForecastError::ModelNotTrained)
        );

        let mut model = categorical_model(1);
        model.fit(&frame(&[1.0, 2.0])).unwrap();
        assert_eq!(model.state(), ModelState::Fitted);
        assert_eq!(
            model.forecast(&frame(&[1.0])),
            Err(ForecastError::ModelNotTrained)
        );
    }

    #[test]
    fn failed_training_commits_nothing() {
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 2.0, 1.0])).unwrap();
        let groups = model.len();

        let bad = DataFrame::builder()
            .numeric("z", vec![1.0, 2.0, 3.0])
            .build()
            .unwrap();
        assert!(model.train(&bad).is_err());
        assert!(model.is_trained());
        assert_eq!(model.len(), groups);

        let mut fresh = categorical_model(1);
        assert!(fresh.train(&frame(&[1.0, f64::NAN, 2.0])).is_err());
        assert_eq!(fresh.state(), ModelState::Unfitted);
    }

    #[test]
    fn validates_configuration_and_data() {
        let mut model =
            categorical_model(1).with_config(WeightedMVFTSConfig::new().with_order(0));
        assert!(matches!(
            model.train(&frame(&[1.0, 2.0])),
            Err(ForecastError::InvalidConfiguration(_))
        ));

        let mut model =
            categorical_model(1).with_config(WeightedMVFTSConfig::new().with_alpha_cut(1.5));
        assert!(model.train(&frame(&[1.0, 2.0])).is_err());

        let mut model = categorical_model(3);
        assert_eq!(
            model.train(&frame(&[1.0, 2.0, 3.0])),
            Err(ForecastError::InsufficientData { needed: 4, got: 3 })
        );

        let y = Variable::new("y", "y", CategoricalPartitioner::new("y"));
        assert!(WeightedMVFTS::new(vec![], y.clone()).is_err());
        assert!(WeightedMVFTS::new(vec![y.clone(), y.clone()], y).is_err());
    }

    #[test]
    fn overlapping_sets_blend_groups() {
        let y = Variable::new("y", "y", GridPartitioner::new(5).unwrap());
        let mut model = WeightedMVFTS::new(vec![y.clone()], y).unwrap();
        let train: Vec<f64> = (0..60).map(|i| 50.0 + 40.0 * ((i % 6) as f64 / 5.0)).collect();
        model.train(&frame(&train)).unwrap();

        let forecast = model.forecast(&frame(&train[..10])).unwrap();
        assert_eq!(forecast.len(), 10);
        let sets = model.target_variable().sets();
        let lo = sets.iter().map(|s| s.centroid).fold(f64::INFINITY, f64::min);
        let hi = sets.iter().map(|s| s.centroid).fold(f64::NEG_INFINITY, f64::max);
        assert!(forecast.iter().all(|f| f.is_finite() && *f >= lo && *f <= hi));
    }

    #[test]
    fn json_round_trip_preserves_forecasts() {
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 1.0, 2.0, 1.0, 2.0, 2.0])).unwrap();

        let restored = WeightedMVFTS::from_json(&model.to_json().unwrap()).unwrap();
        assert!(restored.is_trained());
        assert_eq!(restored.len(), model.len());
        let query = frame(&[1.0, 2.0]);
        assert_eq!(restored.forecast(&query), model.forecast(&query));
    }

    #[test]
    fn display_lists_groups_by_key() {
        let mut model = categorical_model(1);
        model.train(&frame(&[1.0, 2.0, 1.0])).unwrap();
        assert_eq!(
            model.to_string(),
            "Weighted Multivariate FTS:\ny:y1 -> y2 (1.000)\ny:y2 -> y1 (1.000)\n"
        );
    }
}
