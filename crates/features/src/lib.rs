//! Expense Guard Feature Deriver
//!
//! Turns the two raw date fields of an [`ExpenseRecord`](expense_core::ExpenseRecord)
//! into the temporal signals the classifiers were trained on:
//!
//! ```text
//! expense_date ─┬──► day_of_week, is_weekend, month, quarter, is_month_end
//!               │
//! submission_date ─► submission_delay (days)
//! ```
//!
//! The output ([`FeatureRow`]) carries every other record field unchanged and
//! drops the raw dates. Derivation is pure; the only failure is an
//! unparseable date ([`DataError`]).

pub mod dates;
pub mod error;
pub mod row;

pub use dates::{parse_calendar_date, DateFeatures};
pub use error::{DataError, DataResult};
pub use row::{derive_date_features, FeatureRow, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
