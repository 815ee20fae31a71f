//! Combined verdict over bill and model checks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Final decision on an expense claim with its bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverallStatus {
    Approved,
    Rejected,
}

/// Rejected when the bill is invalid or any model flagged the expense
pub fn overall_status(bill_valid: bool, is_suspicious: bool) -> OverallStatus {
    if !bill_valid || is_suspicious {
        OverallStatus::Rejected
    } else {
        OverallStatus::Approved
    }
}
