//! Expense Guard Inference
//!
//! Model inference sits behind the [`Classifier`] trait so the rest of the
//! system never depends on how a model was trained or stored.
//!
//! ```text
//! FeatureRow ──► ModelRegistry ──┬──► RandomForest      ──► {label, confidence}
//!                                ├──► GradientBoosting  ──► {label, confidence}
//!                                ├──► XGBoost           ──► {error}
//!                                └──► LogisticRegression──► {label, confidence}
//! ```
//!
//! The bundled implementation is [`LinearModel`], a logistic model stored
//! as a JSON artifact (`{name}_model.json`).

pub mod classifier;
pub mod error;
pub mod linear;
pub mod registry;

pub use classifier::{ClassProbabilities, Classifier, Label, ModelPrediction};
pub use error::{InferenceError, InferenceResult};
pub use linear::LinearModel;
pub use registry::{ModelRegistry, Predictions, DEFAULT_MODEL_NAMES};
