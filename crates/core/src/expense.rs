//! Expense record - a single claim as submitted by an employee

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// A single expense claim.
///
/// Dates are kept as the raw strings the client sent; turning them into
/// calendar dates (and failing on garbage) is the feature deriver's job.
/// `submission_date` is expected to be on or after `expense_date`, but this
/// is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default)]
    pub expense_id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,

    /// Claimed amount, in the policy currency
    pub amount: Amount,

    // === Risk inputs (model features only) ===
    pub receipt_quality: f64,
    pub ocr_confidence: f64,
    pub previous_violations: u32,

    // === Policy keys ===
    pub department: String,
    pub category: String,

    pub currency: String,
    pub vendor_country: String,
    pub payment_method: String,

    /// Expected format: `YYYY-MM-DD`
    pub expense_date: String,
    /// Expected format: `YYYY-MM-DD`
    pub submission_date: String,

    // 0/1 flags, kept as integers to match the upstream payload
    pub requires_approval: u8,
    pub has_receipt: u8,
    pub manual_review_required: u8,

    /// Free-text justification, may be empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExpenseRecord {
    /// Notes with surrounding whitespace removed
    pub fn justification(&self) -> &str {
        self.notes.trim()
    }

    pub fn has_justification(&self) -> bool {
        !self.justification().is_empty()
    }
}
