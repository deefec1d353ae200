//! Environment guards deciding whether a record may leave the process.

use serde::Serialize;

use crate::telemetry::types::TelemetryConfig;

/// Branch names treated as production.
pub const PRODUCTION_BRANCHES: [&str; 2] = ["main", "master"];

/// Loopback development host name.
pub const LOCAL_HOST: &str = "localhost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Send,
    NonProductionBranch,
    LocalDevelopmentHost,
}

impl GateDecision {
    pub fn allows_send(self) -> bool {
        matches!(self, GateDecision::Send)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GateDecision::Send => "send",
            GateDecision::NonProductionBranch => "non_production_branch",
            GateDecision::LocalDevelopmentHost => "local_development_host",
        }
    }
}

pub fn is_production_branch(branch: &str) -> bool {
    PRODUCTION_BRANCHES.contains(&branch)
}

/// Local traffic is suppressed unless the collector is itself local.
pub fn is_suppressed_local_host(current_host: &str, collection_url: &str) -> bool {
    current_host == LOCAL_HOST && !collection_url.contains(LOCAL_HOST)
}

pub fn evaluate(config: &TelemetryConfig) -> GateDecision {
    if !is_production_branch(&config.branch) {
        return GateDecision::NonProductionBranch;
    }
    if is_suppressed_local_host(&config.current_host, &config.collection_url) {
        return GateDecision::LocalDevelopmentHost;
    }
    GateDecision::Send
}
