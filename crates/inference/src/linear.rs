//! Logistic model loaded from a JSON artifact
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "intercept": -4.2,
//!   "numeric": { "amount": 0.0003, "previous_violations": 0.8 },
//!   "categorical": { "category": { "Travel": 0.4, "Meals": -0.1 } }
//! }
//! ```
//!
//! Categorical fields are one-hot: the weight of the row's value is added,
//! unseen values add nothing.

use std::collections::BTreeMap;
use std::path::Path;

use expense_features::{FeatureRow, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use serde::{Deserialize, Serialize};

use crate::classifier::{ClassProbabilities, Classifier};
use crate::error::{InferenceError, InferenceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Weights {
    intercept: f64,
    #[serde(default)]
    numeric: BTreeMap<String, f64>,
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Binary logistic regression over a [`FeatureRow`]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    weights: Weights,
}

impl LinearModel {
    pub fn new(
        name: impl Into<String>,
        intercept: f64,
        numeric: BTreeMap<String, f64>,
        categorical: BTreeMap<String, BTreeMap<String, f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            weights: Weights {
                intercept,
                numeric,
                categorical,
            },
        }
    }

    /// Load an artifact, rejecting weights for features the row does not have
    pub fn from_file(name: impl Into<String>, path: &Path) -> InferenceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| InferenceError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let weights: Weights = serde_json::from_str(&content)
            .map_err(|e| InferenceError::invalid_artifact(path, e.to_string()))?;

        if let Some(unknown) = weights
            .numeric
            .keys()
            .find(|k| !NUMERIC_FEATURES.contains(&k.as_str()))
        {
            return Err(InferenceError::invalid_artifact(
                path,
                format!("unknown numeric feature {unknown:?}"),
            ));
        }
        if let Some(unknown) = weights
            .categorical
            .keys()
            .find(|k| !CATEGORICAL_FEATURES.contains(&k.as_str()))
        {
            return Err(InferenceError::invalid_artifact(
                path,
                format!("unknown categorical feature {unknown:?}"),
            ));
        }
        let mut all_weights = weights
            .numeric
            .values()
            .chain(weights.categorical.values().flat_map(|m| m.values()))
            .chain(std::iter::once(&weights.intercept));
        if all_weights.any(|w| !w.is_finite()) {
            return Err(InferenceError::invalid_artifact(path, "non-finite weight"));
        }

        Ok(Self {
            name: name.into(),
            weights,
        })
    }

    fn logit(&self, row: &FeatureRow) -> f64 {
        let numeric: f64 = row
            .numeric_features()
            .iter()
            .filter_map(|(name, value)| self.weights.numeric.get(*name).map(|w| w * value))
            .sum();

        let categorical: f64 = row
            .categorical_features()
            .iter()
            .filter_map(|(field, value)| self.weights.categorical.get(*field)?.get(*value))
            .sum();

        self.weights.intercept + numeric + categorical
    }
}

impl Classifier for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_proba(&self, row: &FeatureRow) -> InferenceResult<ClassProbabilities> {
        let z = self.logit(row);
        if !z.is_finite() {
            return Err(InferenceError::NonFiniteScore {
                model: self.name.clone(),
            });
        }
        Ok(ClassProbabilities::from_violation(1.0 / (1.0 + (-z).exp())))
    }
}
