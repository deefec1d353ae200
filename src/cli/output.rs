//! CLI output: error mapping and plain-text rendering.

use crate::error::TelemetryError;
use crate::telemetry::{GateDecision, ResolvedSession, SessionSource, TelemetryConfig};

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &TelemetryError) -> String {
    match e {
        TelemetryError::SerializationError(err) => format!("Invalid JSON payload: {}", err),
        other => other.to_string(),
    }
}

pub fn format_gate(decision: GateDecision, config: &TelemetryConfig) -> String {
    format!(
        "decision: {}\nbranch: {}\ncurrent_host: {}\ncollection_url: {}",
        decision.as_str(),
        config.branch,
        config.current_host,
        config.collection_url
    )
}

/// The id alone, or flagged when it only lives for this process.
pub fn format_session(session: &ResolvedSession) -> String {
    match session.source {
        SessionSource::Ephemeral => format!(
            "{} (not persisted: session storage unavailable)",
            session.session_id
        ),
        SessionSource::Existing | SessionSource::Created => session.session_id.clone(),
    }
}

pub fn format_send(decision: GateDecision, url: &str) -> String {
    if decision.allows_send() {
        format!("dispatched to {}", url)
    } else {
        format!("suppressed ({})", decision.as_str())
    }
}
