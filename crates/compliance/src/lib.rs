//! Expense Guard Compliance Engine
//!
//! Rule-based policy checks for expense claims.
//!
//! ```text
//! ExpenseRecord ──► ComplianceEngine ──► ViolationSet ──► render_report
//!                        ▲
//!                   PolicyConfig
//!        (budgets, authorizations, claim stats)
//! ```
//!
//! ## Key Components
//!
//! - [`config::PolicyConfig`] - Budgets, category authorizations, training stats (not hardcoded)
//! - [`engine::ComplianceEngine`] - Stateless rule evaluation, shareable across requests
//! - [`violation::ViolationSet`] - Ordered, label-keyed violations
//! - [`report::render_report`] - Plain-text report

pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod violation;

pub use config::{BudgetTable, CategoryAuthorizationTable, PolicyConfig, TrainingStatistics};
pub use engine::{evaluate_compliance, ComplianceEngine};
pub use error::{ComplianceError, ComplianceResult};
pub use report::render_report;
pub use violation::{Violation, ViolationKind, ViolationSet};
