//! Feature row - the model-facing view of an expense record

use expense_core::{Amount, ExpenseRecord};
use serde::Serialize;

use crate::dates::{parse_calendar_date, DateFeatures};
use crate::error::DataResult;

/// Names of the numeric model inputs, in [`FeatureRow::numeric_features`] order
pub const NUMERIC_FEATURES: [&str; 13] = [
    "amount",
    "receipt_quality",
    "ocr_confidence",
    "previous_violations",
    "requires_approval",
    "has_receipt",
    "manual_review_required",
    "submission_delay",
    "day_of_week",
    "is_weekend",
    "month",
    "quarter",
    "is_month_end",
];

/// Names of the categorical model inputs, in [`FeatureRow::categorical_features`] order
pub const CATEGORICAL_FEATURES: [&str; 5] = [
    "department",
    "category",
    "currency",
    "vendor_country",
    "payment_method",
];

/// An expense record with its raw dates replaced by derived features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub expense_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub amount: Amount,
    pub receipt_quality: f64,
    pub ocr_confidence: f64,
    pub previous_violations: u32,
    pub department: String,
    pub category: String,
    pub currency: String,
    pub vendor_country: String,
    pub payment_method: String,
    pub requires_approval: u8,
    pub has_receipt: u8,
    pub manual_review_required: u8,
    pub notes: String,
    #[serde(flatten)]
    pub dates: DateFeatures,
}

impl FeatureRow {
    /// Numeric model inputs by name, booleans as 0/1
    pub fn numeric_features(&self) -> [(&'static str, f64); 13] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [
            ("amount", self.amount.to_f64()),
            ("receipt_quality", self.receipt_quality),
            ("ocr_confidence", self.ocr_confidence),
            ("previous_violations", f64::from(self.previous_violations)),
            ("requires_approval", f64::from(self.requires_approval)),
            ("has_receipt", f64::from(self.has_receipt)),
            ("manual_review_required", f64::from(self.manual_review_required)),
            ("submission_delay", self.dates.submission_delay as f64),
            ("day_of_week", f64::from(self.dates.day_of_week)),
            ("is_weekend", flag(self.dates.is_weekend)),
            ("month", f64::from(self.dates.month)),
            ("quarter", f64::from(self.dates.quarter)),
            ("is_month_end", flag(self.dates.is_month_end)),
        ]
    }

    /// Categorical model inputs by field name
    pub fn categorical_features(&self) -> [(&'static str, &str); 5] {
        [
            ("department", self.department.as_str()),
            ("category", self.category.as_str()),
            ("currency", self.currency.as_str()),
            ("vendor_country", self.vendor_country.as_str()),
            ("payment_method", self.payment_method.as_str()),
        ]
    }
}

/// Derive temporal features from a record's raw dates.
///
/// The input is not modified; the two date fields are absent from the
/// returned row. Fails if either date does not parse.
pub fn derive_date_features(record: &ExpenseRecord) -> DataResult<FeatureRow> {
    let expense_date = parse_calendar_date("expense_date", &record.expense_date)?;
    let submission_date = parse_calendar_date("submission_date", &record.submission_date)?;

    Ok(FeatureRow {
        expense_id: record.expense_id,
        employee_id: record.employee_id,
        amount: record.amount,
        receipt_quality: record.receipt_quality,
        ocr_confidence: record.ocr_confidence,
        previous_violations: record.previous_violations,
        department: record.department.clone(),
        category: record.category.clone(),
        currency: record.currency.clone(),
        vendor_country: record.vendor_country.clone(),
        payment_method: record.payment_method.clone(),
        requires_approval: record.requires_approval,
        has_receipt: record.has_receipt,
        manual_review_required: record.manual_review_required,
        notes: record.notes.clone(),
        dates: DateFeatures::from_dates(expense_date, submission_date),
    })
}
