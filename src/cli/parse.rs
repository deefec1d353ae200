//! CLI parse: clap types for the telemetry tool. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Phrasebook telemetry - inspect the session id and send best-effort events
#[derive(Parser, Debug)]
#[command(name = "phrasebook-telemetry")]
#[command(about = "Best-effort usage telemetry client for the phrasebook site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the session id, creating it if absent
    Session,
    /// Clear the stored session id
    ResetSession,
    /// Show whether events would be sent from this environment
    Gate,
    /// Send one event to the collector (gated, waits for delivery)
    Send {
        /// Endpoint name; the request goes to <collection_url>/crp_<endpoint>
        endpoint: String,
        /// JSON payload (default: {})
        payload: Option<String>,
    },
    /// Print the resolved configuration as TOML
    Config,
}
