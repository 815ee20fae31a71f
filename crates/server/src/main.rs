//! Expense Guard - Main entry point

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use expense_server::{create_router, AppState, ConfigOverrides, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "expense-guard")]
#[command(about = "Expense Guard - expense policy and fraud validation service", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON server configuration file
    #[arg(short, long, env = "EXPENSE_GUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "EXPENSE_GUARD_BIND")]
    bind: Option<String>,

    /// JSON policy file (budgets, authorized categories, training statistics)
    #[arg(long, env = "EXPENSE_GUARD_POLICY")]
    policy: Option<PathBuf>,

    /// Directory holding `{name}_model.json` artifacts
    #[arg(long, env = "EXPENSE_GUARD_MODELS")]
    models: Option<PathBuf>,

    /// Base URL of the assistant API
    #[arg(long, env = "EXPENSE_GUARD_ASSISTANT_BASE_URL")]
    assistant_base_url: Option<String>,

    /// Assistant used for bill validation
    #[arg(long, env = "EXPENSE_GUARD_ASSISTANT_ID")]
    assistant_id: Option<String>,

    /// API key for the assistant
    #[arg(long, env = "EXPENSE_GUARD_ASSISTANT_KEY", hide_env_values = true)]
    assistant_key: Option<String>,
}

impl Cli {
    /// File settings first, then flags and environment on top
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        config.apply_overrides(ConfigOverrides {
            bind: self.bind,
            policy_path: self.policy,
            models_dir: self.models,
            assistant_base_url: self.assistant_base_url,
            assistant_id: self.assistant_id,
            assistant_key: self.assistant_key,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr: SocketAddr = config.bind.parse()?;
    tracing::info!(%addr, "Expense Guard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
