//! Expense Guard Server
//!
//! HTTP surface over the policy engine, the model registry and the bill
//! validator:
//!
//! - `GET /health` - status, version, policy fingerprint
//! - `POST /predict` - model predictions and compliance report for one expense
//! - `POST /validate` - bill validation plus fraud detection, combined into
//!   an overall status

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigOverrides, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
