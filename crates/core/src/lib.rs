//! Expense Guard Core - Domain types
//!
//! This crate contains the fundamental types shared by every other crate:
//! - `Amount`: Decimal wrapper for claimed amounts (refunds are negative)
//! - `ExpenseRecord`: A single expense claim as submitted by an employee

pub mod amount;
pub mod expense;

pub use amount::Amount;
pub use expense::ExpenseRecord;
