//! Classifier trait - the interface every model implements

use expense_features::FeatureRow;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::InferenceResult;

/// Binary outcome of a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Label {
    Normal,
    Violation,
}

/// Class probabilities for one row. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub normal: f64,
    pub violation: f64,
}

impl ClassProbabilities {
    /// Build from the probability of the violation class
    pub fn from_violation(p: f64) -> Self {
        let p = p.clamp(0.0, 1.0);
        Self {
            normal: 1.0 - p,
            violation: p,
        }
    }

    /// Ties go to `Normal`
    pub fn label(&self) -> Label {
        if self.violation > self.normal {
            Label::Violation
        } else {
            Label::Normal
        }
    }

    /// Probability of the predicted class as a percentage, 2 decimals
    pub fn confidence(&self) -> f64 {
        let pct = self.normal.max(self.violation) * 100.0;
        (pct * 100.0).round() / 100.0
    }
}

/// Outcome of running one model, as reported to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelPrediction {
    Scored { label: Label, confidence: f64 },
    Failed { error: String },
}

impl ModelPrediction {
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            ModelPrediction::Scored {
                label: Label::Violation,
                ..
            }
        )
    }
}

impl From<ClassProbabilities> for ModelPrediction {
    fn from(probs: ClassProbabilities) -> Self {
        ModelPrediction::Scored {
            label: probs.label(),
            confidence: probs.confidence(),
        }
    }
}

/// A pre-trained binary classifier over feature rows
pub trait Classifier: Send + Sync {
    /// Model name for logging and response keys
    fn name(&self) -> &str;

    fn predict_proba(&self, row: &FeatureRow) -> InferenceResult<ClassProbabilities>;

    fn predict(&self, row: &FeatureRow) -> ModelPrediction {
        match self.predict_proba(row) {
            Ok(probs) => probs.into(),
            Err(e) => ModelPrediction::Failed {
                error: e.to_string(),
            },
        }
    }
}
