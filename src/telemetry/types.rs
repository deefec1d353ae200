//! Shared telemetry types and helpers: logger configuration, timestamps, session ids.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the logger reads from its environment, supplied once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Collector base URL, without the endpoint path.
    pub collection_url: String,
    pub commit_hash: String,
    pub branch: String,
    /// Host name of the running context; `localhost` marks local development.
    pub current_host: String,
}

impl TelemetryConfig {
    pub fn new(
        collection_url: impl Into<String>,
        commit_hash: impl Into<String>,
        branch: impl Into<String>,
        current_host: impl Into<String>,
    ) -> Self {
        Self {
            collection_url: collection_url.into(),
            commit_hash: commit_hash.into(),
            branch: branch.into(),
            current_host: current_host.into(),
        }
    }
}

/// Current time as milliseconds since Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a fresh session id: a UUID v4 in canonical hyphenated form.
pub fn new_session_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// True when `value` is a canonical hyphenated UUID v4.
pub fn is_valid_session_id(value: &str) -> bool {
    if value.len() != 36 {
        return false;
    }
    match Uuid::try_parse(value) {
        Ok(id) => id.get_version_num() == 4 && id.hyphenated().to_string() == value,
        Err(_) => false,
    }
}
