//! CLI route: single route table and run context.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::cli::output::{format_gate, format_send, format_session};
use crate::cli::parse::Commands;
use crate::config::{AppConfig, ConfigLoader};
use crate::error::TelemetryError;
use crate::init::{init_telemetry_with_transport, open_session_store, resolve_session};
use crate::telemetry::routing::{endpoint_url, evaluate};
use crate::telemetry::sessions::{reset_session, SessionSource};
use crate::telemetry::{HttpTransport, Transport};

/// Runtime context for CLI execution: resolved config and the transport used by `send`.
pub struct RunContext {
    config: AppConfig,
    transport: Arc<dyn Transport>,
}

impl RunContext {
    /// Load configuration (global file, optional explicit file, environment).
    pub fn new(config_path: Option<&Path>) -> Result<Self, TelemetryError> {
        let config = ConfigLoader::load(config_path)?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::best_effort());
        Ok(Self::from_config(config, transport))
    }

    pub fn from_config(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, TelemetryError> {
        match command {
            Commands::Session => {
                let session = resolve_session(&self.config.storage);
                if session.source == SessionSource::Ephemeral {
                    warn!("printed session id is not persisted");
                }
                Ok(format_session(&session))
            }
            Commands::ResetSession => {
                let store = open_session_store(&self.config.storage)?;
                reset_session(&store)?;
                info!("session id cleared");
                Ok("session id cleared".to_string())
            }
            Commands::Gate => {
                let telemetry = self.config.telemetry.to_telemetry_config();
                Ok(format_gate(evaluate(&telemetry), &telemetry))
            }
            Commands::Send { endpoint, payload } => {
                let payload: Value = match payload {
                    Some(raw) => serde_json::from_str(raw)?,
                    None => json!({}),
                };
                let logger = init_telemetry_with_transport(&self.config, self.transport.clone());
                logger.log_and_wait(endpoint, &payload).await;
                let url = endpoint_url(&logger.config().collection_url, endpoint);
                Ok(format_send(logger.gate(), &url))
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                TelemetryError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
        }
    }
}
