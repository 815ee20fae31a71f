//! Plain-text compliance report

use expense_core::ExpenseRecord;

use crate::violation::ViolationSet;

const NOT_AVAILABLE: &str = "N/A";
const SUGGESTED_ACTIONS: &str = "Suggested Actions: Please review the expense policy, \
provide necessary justification and/or seek manager review.";

/// Render the human-readable report for one evaluated record.
///
/// Violations are listed in the order the rules fired.
pub fn render_report(record: &ExpenseRecord, violations: &ViolationSet, currency: &str) -> String {
    let or_na = |id: Option<i64>| id.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string());

    let mut lines = vec![
        "Policy Compliance Report".to_string(),
        format!("Expense ID: {}", or_na(record.expense_id)),
        format!(
            "Employee ID: {} | Department: {}",
            or_na(record.employee_id),
            record.department
        ),
        format!(
            "Expense Category & Amount: {} - {} {currency}",
            record.category, record.amount
        ),
    ];

    if violations.is_empty() {
        lines.push("No Violations Detected.".to_string());
    } else {
        lines.push("Detected Violations:".to_string());
        lines.extend(
            violations
                .iter()
                .map(|violation| format!(" - {}: {}", violation.kind, violation.message)),
        );
        lines.push(SUGGESTED_ACTIONS.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::ViolationKind;
    use expense_core::Amount;
    use rust_decimal_macros::dec;

    fn record() -> ExpenseRecord {
        ExpenseRecord {
            expense_id: Some(201),
            employee_id: None,
            amount: Amount::new(dec!(15000.00)),
            receipt_quality: 0.5,
            ocr_confidence: 0.5,
            previous_violations: 0,
            department: "HR".to_string(),
            category: "Travel".to_string(),
            currency: "INR".to_string(),
            vendor_country: "IN".to_string(),
            payment_method: "Cash".to_string(),
            expense_date: "2024-02-08".to_string(),
            submission_date: "2024-02-09".to_string(),
            requires_approval: 0,
            has_receipt: 1,
            manual_review_required: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_report_without_violations() {
        let report = render_report(&record(), &ViolationSet::new(), "INR");

        assert_eq!(
            report,
            "Policy Compliance Report\n\
             Expense ID: 201\n\
             Employee ID: N/A | Department: HR\n\
             Expense Category & Amount: Travel - 15000 INR\n\
             No Violations Detected."
        );
    }

    #[test]
    fn test_report_lists_violations_in_order() {
        let mut violations = ViolationSet::new();
        violations.insert(ViolationKind::OverBudget, "over");
        violations.insert(ViolationKind::UnauthorizedCategory, "not allowed");

        let report = render_report(&record(), &violations, "INR");
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[4], "Detected Violations:");
        assert_eq!(lines[5], " - Over Budget: over");
        assert_eq!(lines[6], " - Unauthorized Category: not allowed");
        assert!(lines[7].starts_with("Suggested Actions:"));
        assert_eq!(lines.len(), 8);
        assert!(!report.ends_with('\n'));
    }
}
