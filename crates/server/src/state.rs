//! Application state

use std::sync::Arc;

use expense_assistant::{AssistantClient, BillValidator};
use expense_compliance::{ComplianceEngine, ComplianceResult, PolicyConfig};
use expense_inference::ModelRegistry;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ComplianceEngine>,
    pub models: Arc<ModelRegistry>,
    pub bill_validator: Option<Arc<dyn BillValidator>>,
    pub policy_fingerprint: Arc<str>,
}

impl AppState {
    pub fn new(
        engine: ComplianceEngine,
        models: ModelRegistry,
        bill_validator: Option<Arc<dyn BillValidator>>,
    ) -> ComplianceResult<Self> {
        let policy_fingerprint = engine.config().fingerprint()?;
        Ok(Self {
            engine: Arc::new(engine),
            models: Arc::new(models),
            bill_validator,
            policy_fingerprint: policy_fingerprint.into(),
        })
    }

    /// Load policy, models and assistant client from configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let policy = match &config.policy_path {
            Some(path) => PolicyConfig::from_file(path)?,
            None => {
                info!("No policy file given, using built-in policy");
                PolicyConfig::default()
            }
        };

        let models = ModelRegistry::load_dir(&config.models_dir, config.model_names.as_slice())?;
        if models.is_empty() {
            warn!(dir = %config.models_dir.display(), "No models loaded");
        }

        let bill_validator = match &config.assistant {
            Some(assistant) => {
                let client = AssistantClient::new(assistant.clone())?;
                Some(Arc::new(client) as Arc<dyn BillValidator>)
            }
            None => {
                warn!("Assistant not configured, /validate is disabled");
                None
            }
        };

        let state = Self::new(ComplianceEngine::new(policy), models, bill_validator)?;
        info!(fingerprint = %state.policy_fingerprint, "Policy loaded");
        Ok(state)
    }
}
