//! Compliance Engine - policy rule evaluation
//!
//! Four independent rules, evaluated in a fixed order against the same
//! record snapshot:
//!
//! ```text
//! 1. Over Budget            category budgeted  && amount > limit
//! 2. Unauthorized Category  department known   && category not allowed
//! 3. Missing Justification  (1) holds          && notes blank
//! 4. Outlier                stats supplied     && amount > median + 3*std
//! ```
//!
//! No rule short-circuits another. Unknown categories and departments skip
//! the rules keyed on them instead of failing, since the tables are not
//! guaranteed to be exhaustive.

use expense_core::ExpenseRecord;
use tracing::debug;

use crate::config::{BudgetTable, CategoryAuthorizationTable, PolicyConfig, TrainingStatistics};
use crate::violation::{ViolationKind, ViolationSet};

const DEFAULT_CURRENCY: &str = "INR";

/// Evaluate all policy rules against a record.
///
/// Messages quote amounts in the default policy currency; use
/// [`ComplianceEngine`] to configure it.
pub fn evaluate_compliance(
    record: &ExpenseRecord,
    budgets: &BudgetTable,
    categories: &CategoryAuthorizationTable,
    stats: Option<&TrainingStatistics>,
) -> ViolationSet {
    evaluate_rules(record, budgets, categories, stats, DEFAULT_CURRENCY)
}

fn evaluate_rules(
    record: &ExpenseRecord,
    budgets: &BudgetTable,
    categories: &CategoryAuthorizationTable,
    stats: Option<&TrainingStatistics>,
    currency: &str,
) -> ViolationSet {
    let mut violations = ViolationSet::new();
    let amount = record.amount.value();
    let category = record.category.as_str();
    let department = record.department.as_str();

    // Rule 1
    let over_budget_limit = budgets
        .limit_for(category)
        .filter(|limit| amount > *limit);

    if let Some(limit) = over_budget_limit {
        debug!(%category, %amount, %limit, "over budget");
        violations.insert(
            ViolationKind::OverBudget,
            format!(
                "Claimed amount {} {currency} exceeds allowed budget {} {currency} for {category}.",
                record.amount,
                limit.normalize(),
            ),
        );
    }

    // Rule 2
    if categories.authorizes(department, category) == Some(false) {
        debug!(%department, %category, "unauthorized category");
        violations.insert(
            ViolationKind::UnauthorizedCategory,
            format!("Category {category} is not allowed for department {department}."),
        );
    }

    // Rule 3: refinement of rule 1, both may fire
    if over_budget_limit.is_some() && !record.has_justification() {
        debug!(%category, "over budget without justification");
        violations.insert(
            ViolationKind::MissingJustification,
            "High amount claimed but justification (notes) is missing.",
        );
    }

    // Rule 4
    if let Some(stats) = stats {
        let threshold = stats.outlier_threshold();
        if amount > threshold {
            debug!(%amount, %threshold, "outlier");
            violations.insert(
                ViolationKind::Outlier,
                format!(
                    "Claimed amount {} {currency} is unusually high compared to median {} {currency}.",
                    record.amount,
                    stats.median.normalize(),
                ),
            );
        }
    }

    violations
}

/// Rule engine bound to an immutable policy.
///
/// Holds no mutable state, so one instance can be shared across threads
/// and requests.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    config: PolicyConfig,
}

impl ComplianceEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Check a record against every policy rule
    pub fn evaluate(&self, record: &ExpenseRecord) -> ViolationSet {
        let violations = evaluate_rules(
            record,
            &self.config.budgets,
            &self.config.authorized_categories,
            self.config.training_stats.as_ref(),
            &self.config.currency,
        );

        debug!(
            expense_id = ?record.expense_id,
            violations = violations.len(),
            "compliance evaluated"
        );
        violations
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }
}
