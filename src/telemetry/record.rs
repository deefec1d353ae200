//! Wire schema for a single telemetry record.

use serde::{Deserialize, Serialize};

use crate::telemetry::types::now_millis;

/// One event as sent to the collector. Built per call, sent once, dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord<P> {
    pub session_id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub commit_hash: String,
    pub payload: P,
}

impl<P: Serialize> LogRecord<P> {
    pub fn new(
        session_id: impl Into<String>,
        timestamp: i64,
        commit_hash: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp,
            commit_hash: commit_hash.into(),
            payload,
        }
    }

    pub fn with_now(
        session_id: impl Into<String>,
        commit_hash: impl Into<String>,
        payload: P,
    ) -> Self {
        Self::new(session_id, now_millis(), commit_hash, payload)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
