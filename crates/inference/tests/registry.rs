//! Registry loading and side-by-side prediction tests

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use expense_core::ExpenseRecord;
use expense_features::{derive_date_features, FeatureRow};
use expense_inference::{
    ClassProbabilities, Classifier, InferenceError, InferenceResult, Label, LinearModel,
    ModelPrediction, ModelRegistry, DEFAULT_MODEL_NAMES,
};
use tempfile::TempDir;

fn row(amount: f64, category: &str) -> FeatureRow {
    let record: ExpenseRecord = serde_json::from_value(serde_json::json!({
        "expense_id": 201,
        "employee_id": 1500,
        "amount": amount,
        "receipt_quality": 0.65,
        "ocr_confidence": 0.90,
        "previous_violations": 1,
        "department": "Engineering",
        "category": category,
        "currency": "INR",
        "vendor_country": "US",
        "payment_method": "Credit Card",
        "expense_date": "2024-02-08",
        "submission_date": "2024-02-08",
        "requires_approval": 1,
        "has_receipt": 1,
        "manual_review_required": 0,
        "notes": ""
    }))
    .unwrap();
    derive_date_features(&record).unwrap()
}

fn write_model(dir: &TempDir, name: &str, body: serde_json::Value) {
    fs::write(
        dir.path().join(format!("{name}_model.json")),
        serde_json::to_string(&body).unwrap(),
    )
    .unwrap();
}

/// Always fails, to check that one bad model doesn't hide the others
struct BrokenModel;

impl Classifier for BrokenModel {
    fn name(&self) -> &str {
        "Broken"
    }

    fn predict_proba(&self, _row: &FeatureRow) -> InferenceResult<ClassProbabilities> {
        Err(InferenceError::NonFiniteScore {
            model: "Broken".to_string(),
        })
    }
}

#[test]
fn test_linear_model_scores_amount() {
    let model = LinearModel::new(
        "Amount",
        -5.0,
        BTreeMap::from([("amount".to_string(), 0.5)]),
        BTreeMap::new(),
    );

    // logit = -5 + 0.5 * 10 = 0 -> p = 0.5 -> Normal on tie
    let probs = model.predict_proba(&row(10.0, "Travel")).unwrap();
    assert_eq!(probs.violation, 0.5);
    assert_eq!(probs.label(), Label::Normal);

    let probs = model.predict_proba(&row(20.0, "Travel")).unwrap();
    assert_eq!(probs.label(), Label::Violation);
}

#[test]
fn test_linear_model_one_hot_categories() {
    let model = LinearModel::new(
        "Category",
        0.0,
        BTreeMap::new(),
        BTreeMap::from([(
            "category".to_string(),
            BTreeMap::from([("Travel".to_string(), 3.0), ("Meals".to_string(), -3.0)]),
        )]),
    );

    assert_eq!(model.predict(&row(100.0, "Travel")), ModelPrediction::Scored {
        label: Label::Violation,
        confidence: 95.26,
    });
    assert_eq!(model.predict(&row(100.0, "Meals")), ModelPrediction::Scored {
        label: Label::Normal,
        confidence: 95.26,
    });
    // Unseen value contributes nothing: logit 0
    assert_eq!(model.predict(&row(100.0, "Lodging")), ModelPrediction::Scored {
        label: Label::Normal,
        confidence: 50.0,
    });
}

#[test]
fn test_load_dir_skips_missing_models() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "RandomForest", serde_json::json!({ "intercept": 2.0 }));
    write_model(&dir, "XGBoost", serde_json::json!({ "intercept": -2.0 }));

    let registry = ModelRegistry::load_dir(dir.path(), &DEFAULT_MODEL_NAMES).unwrap();

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["RandomForest", "XGBoost"]);
}

#[test]
fn test_load_dir_empty_is_ok() {
    let dir = TempDir::new().unwrap();
    let registry = ModelRegistry::load_dir(dir.path(), &DEFAULT_MODEL_NAMES).unwrap();

    assert!(registry.is_empty());
    let predictions = registry.predict_all(&row(100.0, "Travel"));
    assert!(predictions.is_empty());
    assert!(!predictions.is_suspicious());
}

#[test]
fn test_load_dir_rejects_corrupt_artifact() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("XGBoost_model.json"), "{ not json").unwrap();

    let err = ModelRegistry::load_dir(dir.path(), &["XGBoost"]).unwrap_err();
    assert!(matches!(err, InferenceError::InvalidArtifact { .. }));
}

#[test]
fn test_load_dir_rejects_unknown_feature() {
    let dir = TempDir::new().unwrap();
    write_model(
        &dir,
        "LogisticRegression",
        serde_json::json!({ "intercept": 0.0, "numeric": { "expense_date": 1.0 } }),
    );

    let err = ModelRegistry::load_dir(dir.path(), &["LogisticRegression"]).unwrap_err();
    assert!(err.to_string().contains("expense_date"));
}

#[test]
fn test_predict_all_in_registry_order() {
    let dir = TempDir::new().unwrap();
    for (name, intercept) in [
        ("RandomForest", 3.0),
        ("GradientBoosting", -3.0),
        ("XGBoost", -1.0),
        ("LogisticRegression", -2.0),
    ] {
        write_model(&dir, name, serde_json::json!({ "intercept": intercept }));
    }

    let registry = ModelRegistry::load_dir(dir.path(), &DEFAULT_MODEL_NAMES).unwrap();
    let predictions = registry.predict_all(&row(7500.0, "Travel"));

    assert_eq!(predictions.len(), 4);
    assert!(predictions.is_suspicious());
    assert!(predictions.get("RandomForest").unwrap().is_violation());
    assert!(!predictions.get("XGBoost").unwrap().is_violation());

    let json = serde_json::to_string(&predictions).unwrap();
    let order: Vec<_> = DEFAULT_MODEL_NAMES
        .iter()
        .map(|name| json.find(name).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_failing_model_does_not_hide_others() {
    let mut registry = ModelRegistry::new();
    registry.register(Arc::new(BrokenModel));
    registry.register(Arc::new(LinearModel::new(
        "Intercept",
        -4.0,
        BTreeMap::new(),
        BTreeMap::new(),
    )));

    let predictions = registry.predict_all(&row(100.0, "Meals"));

    assert_eq!(predictions.len(), 2);
    match predictions.get("Broken").unwrap() {
        ModelPrediction::Failed { error } => assert!(error.contains("non-finite")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(
        predictions.get("Intercept").unwrap(),
        &ModelPrediction::Scored {
            label: Label::Normal,
            confidence: 98.2,
        }
    );
    assert!(!predictions.is_suspicious());
}
