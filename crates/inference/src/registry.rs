//! Model Registry - loads classifiers and runs them side by side

use std::path::Path;
use std::sync::Arc;

use expense_features::FeatureRow;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::classifier::{Classifier, ModelPrediction};
use crate::error::InferenceResult;
use crate::linear::LinearModel;

/// Models looked for when no explicit list is configured
pub const DEFAULT_MODEL_NAMES: [&str; 4] = [
    "RandomForest",
    "GradientBoosting",
    "XGBoost",
    "LogisticRegression",
];

/// Registry of classifiers, run in registration order
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: Vec<Arc<dyn Classifier>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{name}_model.json` for each name from `dir`.
    ///
    /// A missing artifact is skipped with a warning so the service can run
    /// with a partial model set. A present but unreadable artifact is an error.
    pub fn load_dir<S: AsRef<str>>(dir: &Path, names: &[S]) -> InferenceResult<Self> {
        let mut registry = Self::new();

        for name in names {
            let name = name.as_ref();
            let path = dir.join(format!("{name}_model.json"));

            if !path.exists() {
                warn!(model = name, path = %path.display(), "Model file not found, skipping");
                continue;
            }

            let model = LinearModel::from_file(name, &path)?;
            info!(model = name, path = %path.display(), "Loaded model");
            registry.register(Arc::new(model));
        }

        Ok(registry)
    }

    pub fn register(&mut self, model: Arc<dyn Classifier>) {
        self.models.push(model);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Run every model; a failing model is reported, not propagated
    pub fn predict_all(&self, row: &FeatureRow) -> Predictions {
        let entries = self
            .models
            .iter()
            .map(|model| {
                let prediction = model.predict(row);
                if let ModelPrediction::Failed { error } = &prediction {
                    warn!(model = model.name(), %error, "Model prediction failed");
                } else {
                    debug!(model = model.name(), ?prediction, "Model prediction");
                }
                (model.name().to_string(), prediction)
            })
            .collect();

        Predictions { entries }
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-model predictions in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    entries: Vec<(String, ModelPrediction)>,
}

impl Predictions {
    pub fn get(&self, model: &str) -> Option<&ModelPrediction> {
        self.entries
            .iter()
            .find(|(name, _)| name == model)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelPrediction)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// True if any model labels the row a violation
    pub fn is_suspicious(&self) -> bool {
        self.entries.iter().any(|(_, p)| p.is_violation())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Predictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, prediction) in &self.entries {
            map.serialize_entry(name, prediction)?;
        }
        map.end()
    }
}
