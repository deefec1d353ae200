//! Telemetry domain: session identity, records, gating, emission.

mod types;

pub mod emission;
pub mod facade;
pub mod record;
pub mod routing;
pub mod sessions;

pub use emission::{HttpTransport, Transport};
pub use facade::TelemetryLogger;
pub use record::LogRecord;
pub use routing::{endpoint_url, GateDecision};
pub use sessions::{
    MemorySessionStore, ResolvedSession, SessionSource, SessionStore, SledSessionStore,
};
pub use types::{is_valid_session_id, new_session_id, now_millis, TelemetryConfig};
