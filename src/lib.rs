//! Phrasebook Telemetry: best-effort usage telemetry
//!
//! Assigns a persistent per-installation session id, decides from build and environment metadata
//! whether telemetry may fire, and sends each event as a fire-and-forget JSON POST.

pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod telemetry;

pub use init::init_telemetry;
pub use telemetry::{LogRecord, TelemetryConfig, TelemetryLogger};
