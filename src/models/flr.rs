//! Fuzzy logical relationships and their generation from fuzzified data.

use crate::partition::Membership;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lagged labels of one variable inside a left-hand side, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LhsTerm {
    pub variable: String,
    pub labels: Vec<String>,
}

/// Left-hand-side pattern of a fuzzy relationship.
///
/// Terms follow variable declaration order; labels inside a term follow lag
/// order. [`Lhs::key`] relies on this convention to be canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lhs {
    terms: Vec<LhsTerm>,
}

impl Lhs {
    pub fn new(terms: Vec<LhsTerm>) -> Self {
        Self { terms }
    }

    /// Pattern over a single variable.
    pub fn single<S: Into<String>>(variable: &str, labels: impl IntoIterator<Item = S>) -> Self {
        Self::new(vec![LhsTerm {
            variable: variable.to_string(),
            labels: labels.into_iter().map(Into::into).collect(),
        }])
    }

    pub fn terms(&self) -> &[LhsTerm] {
        &self.terms
    }

    /// Canonical key, e.g. `load:A1,A2|month:M3,M3`.
    ///
    /// Delimiters and backslashes inside names and labels are escaped with a
    /// backslash, so distinct patterns never share a key.
    pub fn key(&self) -> String {
        self.terms
            .iter()
            .map(|t| {
                let labels: Vec<String> = t.labels.iter().map(|l| escape(l)).collect();
                format!("{}:{}", escape(&t.variable), labels.join(","))
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

fn escape(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        if matches!(c, '\\' | ':' | ',' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl fmt::Display for Lhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Observed transition from an LHS pattern to the next target label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flr {
    pub lhs: Lhs,
    pub rhs: String,
}

impl fmt::Display for Flr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// Every LHS pattern a window can produce, with the product of its memberships.
///
/// `window` holds, per variable, the memberships of each lagged position.
/// A position with several labels multiplies the number of patterns; a
/// position with none yields no pattern at all.
pub fn expand_lhs(window: &[(&str, &[Vec<Membership>])]) -> Vec<(Lhs, f64)> {
    let mut partial: Vec<(Vec<&str>, f64)> = vec![(Vec::new(), 1.0)];

    for &(_, lags) in window {
        for options in lags {
            partial = partial
                .iter()
                .flat_map(|(labels, degree)| {
                    options.iter().map(move |m| {
                        let mut next = labels.clone();
                        next.push(m.label.as_str());
                        (next, degree * m.degree)
                    })
                })
                .collect();
        }
    }

    partial
        .into_iter()
        .map(|(flat, degree)| {
            let mut labels = flat.into_iter();
            let terms = window
                .iter()
                .map(|&(variable, lags)| LhsTerm {
                    variable: variable.to_string(),
                    labels: labels.by_ref().take(lags.len()).map(String::from).collect(),
                })
                .collect();
            (Lhs::new(terms), degree)
        })
        .collect()
}

/// Slide a window of `order` positions over fuzzified data.
///
/// For every position `k >= order`, the LHS reads positions `k-order..k` of
/// every explanatory variable and the RHS is the target label at `k`.
pub fn generate_flrs(
    explanatory: &[(&str, Vec<Vec<Membership>>)],
    target: &[Vec<Membership>],
    order: usize,
) -> Vec<Flr> {
    let mut flrs = Vec::new();

    for k in order..target.len() {
        let window: Vec<(&str, &[Vec<Membership>])> = explanatory
            .iter()
            .map(|(name, seq)| (*name, &seq[k - order..k]))
            .collect();

        for (lhs, _) in expand_lhs(&window) {
            for rhs in &target[k] {
                flrs.push(Flr {
                    lhs: lhs.clone(),
                    rhs: rhs.label.clone(),
                });
            }
        }
    }

    flrs
}
