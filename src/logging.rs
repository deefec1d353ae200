//! Logging System
//!
//! Structured diagnostics via the `tracing` crate. The telemetry library only emits events
//! (dispatch and suppression at `debug`, storage fallback at `warn`); binaries call
//! [`init_logging`] once to decide where they go.

use crate::error::TelemetryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_ENV: &str = "PHRASEBOOK_LOG";
pub const LOG_FORMAT_ENV: &str = "PHRASEBOOK_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "PHRASEBOOK_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable all diagnostics when false
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("dev", "phrasebook", "phrasebook-telemetry")
        .map(|dirs| dirs.data_dir().join("telemetry.log"))
        .unwrap_or_else(|| PathBuf::from("phrasebook-telemetry.log"))
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        parse_format(&self.format)?;
        parse_output(&self.output)?;
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(format!(
                "Invalid log level: {} (must be trace, debug, info, warn, error or off)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

fn parse_format(format: &str) -> Result<LogFormat, String> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        )),
    }
}

fn parse_output(output: &str) -> Result<LogOutput, String> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        other => Err(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            other
        )),
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (PHRASEBOOK_LOG, PHRASEBOOK_LOG_FORMAT, PHRASEBOOK_LOG_OUTPUT)
/// 2. The given config (CLI flags are applied to it by the caller)
/// 3. Defaults
///
/// A second call is a no-op.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), TelemetryError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = overridden(
        LOG_FORMAT_ENV,
        std::env::var(LOG_FORMAT_ENV).ok(),
        &config.format,
        parse_format,
    )?;
    let output = overridden(
        LOG_OUTPUT_ENV,
        std::env::var(LOG_OUTPUT_ENV).ok(),
        &config.output,
        parse_output,
    )?;

    let (writer, ansi) = match output {
        LogOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), config.color),
        LogOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), config.color),
        LogOutput::File => (BoxMakeWriter::new(Arc::new(open_log_file(config)?)), false),
    };

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    };

    // Already initialized (tests, embedding applications): keep the existing subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
    Ok(())
}

/// An environment value replaces the configured one and must parse just the same.
fn overridden<T>(
    var: &str,
    env_value: Option<String>,
    configured: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, TelemetryError> {
    match env_value {
        Some(value) => {
            parse(&value).map_err(|e| TelemetryError::ConfigError(format!("{}: {}", var, e)))
        }
        None => parse(configured).map_err(TelemetryError::ConfigError),
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, TelemetryError> {
    if let Some(parent) = config.file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            TelemetryError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| {
            TelemetryError::ConfigError(format!(
                "Failed to open log file {:?}: {}",
                config.file, e
            ))
        })
}

/// Build environment filter from PHRASEBOOK_LOG or the config
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| TelemetryError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }
    Ok(filter)
}
