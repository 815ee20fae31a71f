//! Server configuration

use std::path::{Path, PathBuf};

use expense_assistant::AssistantConfig;
use expense_inference::DEFAULT_MODEL_NAMES;
use serde::{Deserialize, Serialize};
use tracing::warn;

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_names() -> Vec<String> {
    DEFAULT_MODEL_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Values taken from flags or the environment; each one set wins over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub policy_path: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub assistant_base_url: Option<String>,
    pub assistant_id: Option<String>,
    pub assistant_key: Option<String>,
}

/// Everything needed to start the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Policy file; built-in defaults when absent
    #[serde(default)]
    pub policy_path: Option<PathBuf>,

    /// Directory holding `{name}_model.json` artifacts
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default = "default_model_names")]
    pub model_names: Vec<String>,

    /// Hosted bill validation; `/validate` answers 503 without it
    #[serde(default)]
    pub assistant: Option<AssistantConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            policy_path: None,
            models_dir: default_models_dir(),
            model_names: default_model_names(),
            assistant: None,
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file. The API key is never read from the file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Layer flag and environment values over this configuration.
    ///
    /// A configured assistant needs an API key, and a base URL needs an
    /// assistant to apply to.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> anyhow::Result<Self> {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(policy_path) = overrides.policy_path {
            self.policy_path = Some(policy_path);
        }
        if let Some(models_dir) = overrides.models_dir {
            self.models_dir = models_dir;
        }

        if let Some(id) = overrides.assistant_id {
            match self.assistant.as_mut() {
                Some(assistant) => assistant.assistant_id = id,
                None => self.assistant = Some(AssistantConfig::new(id, "")),
            }
        }

        match self.assistant.as_mut() {
            Some(assistant) => {
                if let Some(url) = overrides.assistant_base_url {
                    assistant.base_url = url;
                }
                match overrides.assistant_key {
                    Some(key) if !key.trim().is_empty() => assistant.api_key = key,
                    _ => anyhow::bail!(
                        "assistant {} configured but EXPENSE_GUARD_ASSISTANT_KEY is not set",
                        assistant.assistant_id
                    ),
                }
            }
            None => {
                if let Some(url) = overrides.assistant_base_url {
                    anyhow::bail!(
                        "assistant base URL {url} given but no assistant id is configured"
                    );
                }
                if overrides.assistant_key.is_some() {
                    warn!("Assistant key set but no assistant configured, ignoring it");
                }
            }
        }

        Ok(self)
    }
}
