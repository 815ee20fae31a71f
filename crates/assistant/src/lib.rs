//! Expense Guard Assistant
//!
//! Bill validation is delegated to a hosted assistant behind the
//! [`BillValidator`] trait. Its verdict is combined with the model verdict
//! by [`overall_status`].

pub mod bill;
pub mod client;
pub mod error;
pub mod status;

pub use bill::{BillDocument, BillItem, Party};
pub use client::{AssistantClient, AssistantConfig, BillValidator, BillVerdict};
pub use error::{AssistantError, AssistantResult};
pub use status::{overall_status, OverallStatus};
