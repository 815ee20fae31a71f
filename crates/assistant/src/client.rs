//! Bill validation through a hosted assistant

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bill::BillDocument;
use crate::error::{AssistantError, AssistantResult};

/// Assistant's answer for one bill
///
/// The response body is kept as-is; only the `bill_valid` flag is read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BillVerdict {
    raw: serde_json::Value,
    #[serde(skip)]
    bill_valid: bool,
}

impl BillVerdict {
    /// A missing or non-boolean `bill_valid` counts as invalid
    pub fn from_response(raw: serde_json::Value) -> Self {
        let bill_valid = raw
            .get("bill_valid")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        Self { raw, bill_valid }
    }

    pub fn bill_valid(&self) -> bool {
        self.bill_valid
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// Validates a bill document against an external service
#[async_trait]
pub trait BillValidator: Send + Sync {
    /// Validator name for logging
    fn name(&self) -> &str;

    async fn validate_bill(&self, bill: &BillDocument) -> AssistantResult<BillVerdict>;
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Connection settings for [`AssistantClient`]
#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub assistant_id: String,
    /// Supplied from the environment, never from a config file
    #[serde(skip)]
    pub api_key: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl AssistantConfig {
    pub fn new(assistant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            assistant_id: assistant_id.into(),
            api_key: api_key.into(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> AssistantResult<()> {
        if self.assistant_id.trim().is_empty() {
            return Err(AssistantError::Config("assistant id is empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Config("API key is empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(AssistantError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    fn runs_url(&self) -> String {
        format!(
            "{}/assistants/{}/runs",
            self.base_url.trim_end_matches('/'),
            self.assistant_id
        )
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("base_url", &self.base_url)
            .field("assistant_id", &self.assistant_id)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    input: &'a BillDocument,
}

/// HTTP client for the hosted assistant
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> AssistantResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }
}

#[async_trait]
impl BillValidator for AssistantClient {
    fn name(&self) -> &str {
        "assistant"
    }

    async fn validate_bill(&self, bill: &BillDocument) -> AssistantResult<BillVerdict> {
        let url = self.config.runs_url();
        debug!(%url, invoice = %bill.invoice_number, "Sending bill to assistant");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&RunRequest { input: bill })
            .send()
            .await?
            .error_for_status()?;

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        let verdict = BillVerdict::from_response(raw);
        info!(
            invoice = %bill.invoice_number,
            bill_valid = verdict.bill_valid(),
            "Assistant verdict received"
        );
        Ok(verdict)
    }
}
