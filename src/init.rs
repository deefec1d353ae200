//! Process start-up: open the session store and build the logger from loaded configuration.
//!
//! Call once near the top of `main` and pass the returned [`TelemetryLogger`] to whatever needs
//! it. Storage problems never stop start-up; they downgrade the session id to process lifetime.

use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StorageSettings};
use crate::error::StorageError;
use crate::telemetry::routing::evaluate;
use crate::telemetry::sessions::service::ephemeral;
use crate::telemetry::sessions::{resolve_or_ephemeral, ResolvedSession, SledSessionStore};
use crate::telemetry::{HttpTransport, TelemetryLogger, Transport};

/// Open the sled session store at the configured (or platform default) location.
pub fn open_session_store(settings: &StorageSettings) -> Result<SledSessionStore, StorageError> {
    let path = settings.resolved_session_store_path().ok_or_else(|| {
        StorageError::Unavailable("no data directory for the session store".to_string())
    })?;
    SledSessionStore::open(&path)
}

/// Resolve the session id, falling back to an in-memory id if the store cannot be used.
pub fn resolve_session(settings: &StorageSettings) -> ResolvedSession {
    match open_session_store(settings) {
        Ok(store) => resolve_or_ephemeral(&store),
        Err(err) => ephemeral(&err),
    }
}

/// Build the process logger with the HTTP transport. Never fails.
pub fn init_telemetry(config: &AppConfig) -> TelemetryLogger {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::best_effort());
    init_telemetry_with_transport(config, transport)
}

/// Build the process logger with a caller-supplied transport.
pub fn init_telemetry_with_transport(
    config: &AppConfig,
    transport: Arc<dyn Transport>,
) -> TelemetryLogger {
    let session = resolve_session(&config.storage);
    let telemetry = config.telemetry.to_telemetry_config();
    info!(
        session_source = ?session.source,
        branch = %telemetry.branch,
        gate = evaluate(&telemetry).as_str(),
        "telemetry initialized"
    );
    TelemetryLogger::new(telemetry, session.session_id, transport)
}
