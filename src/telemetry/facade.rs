//! Telemetry logger: the single entry point call sites hold.
//!
//! A `TelemetryLogger` is built once per process from a [`TelemetryConfig`], a resolved session
//! id and a [`Transport`], then cloned into whatever needs it. `log` is gated by branch and host;
//! when the gate is closed, or anything later fails, the call does nothing visible.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::telemetry::emission::{deliver, spawn_delivery, Transport};
use crate::telemetry::record::LogRecord;
use crate::telemetry::routing::{endpoint_url, evaluate, GateDecision};
use crate::telemetry::sessions::{resolve_or_ephemeral, SessionStore};
use crate::telemetry::types::TelemetryConfig;

#[derive(Clone)]
pub struct TelemetryLogger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    config: TelemetryConfig,
    session_id: String,
    transport: Arc<dyn Transport>,
}

impl TelemetryLogger {
    pub fn new(
        config: TelemetryConfig,
        session_id: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                config,
                session_id: session_id.into(),
                transport,
            }),
        }
    }

    /// Resolve (or create) the session id from `store`, falling back to an in-memory id.
    pub fn from_store(
        config: TelemetryConfig,
        store: &dyn SessionStore,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let resolved = resolve_or_ephemeral(store);
        Self::new(config, resolved.session_id, transport)
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.inner.config
    }

    pub fn gate(&self) -> GateDecision {
        evaluate(&self.inner.config)
    }

    /// Fire-and-forget. Never blocks, never reports failure.
    pub fn log<P: Serialize>(&self, endpoint: &str, payload: P) {
        let _ = self.dispatch(endpoint, payload);
    }

    /// Same gate and record as `log`, but waits for the send to finish.
    pub async fn log_and_wait<P: Serialize>(&self, endpoint: &str, payload: P) {
        if let Some((url, body)) = self.prepare(endpoint, payload) {
            deliver(self.inner.transport.clone(), url, body).await;
        }
    }

    pub(crate) fn dispatch<P: Serialize>(
        &self,
        endpoint: &str,
        payload: P,
    ) -> Option<JoinHandle<()>> {
        let (url, body) = self.prepare(endpoint, payload)?;
        spawn_delivery(self.inner.transport.clone(), url, body)
    }

    fn prepare<P: Serialize>(&self, endpoint: &str, payload: P) -> Option<(String, String)> {
        let config = &self.inner.config;
        let decision = evaluate(config);
        if !decision.allows_send() {
            debug!(endpoint = %endpoint, reason = decision.as_str(), "telemetry suppressed");
            return None;
        }

        let record = LogRecord::with_now(
            self.inner.session_id.as_str(),
            config.commit_hash.as_str(),
            payload,
        );
        let body = match record.to_json() {
            Ok(body) => body,
            Err(err) => {
                debug!(endpoint = %endpoint, error = %err, "telemetry payload not serializable");
                return None;
            }
        };
        let url = endpoint_url(&config.collection_url, endpoint);
        debug!(endpoint = %endpoint, url = %url, "telemetry dispatch");
        Some((url, body))
    }
}

impl std::fmt::Debug for TelemetryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryLogger")
            .field("config", &self.inner.config)
            .field("session_id", &self.inner.session_id)
            .finish_non_exhaustive()
    }
}
