//! Configuration System
//!
//! Layered configuration for the telemetry client. Build-time values seed the defaults; a global
//! TOML file, an explicit `--config` file and `PHRASEBOOK_*` environment variables override them
//! in that order.

use crate::error::TelemetryError;
use crate::logging::LoggingConfig;
use crate::telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::env::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Values the build pipeline bakes into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub commit_hash: &'static str,
    pub branch: &'static str,
    pub collection_url: &'static str,
}

pub const DEFAULT_COLLECTION_URL: &str = "https://telemetry.phrasebook.dev";

impl BuildInfo {
    /// Read `PHRASEBOOK_COMMIT_HASH`, `PHRASEBOOK_GIT_BRANCH` and `PHRASEBOOK_COLLECTION_URL`
    /// as they were at compile time.
    pub const fn current() -> Self {
        Self {
            commit_hash: match option_env!("PHRASEBOOK_COMMIT_HASH") {
                Some(hash) => hash,
                None => "unknown",
            },
            branch: match option_env!("PHRASEBOOK_GIT_BRANCH") {
                Some(branch) => branch,
                None => "unknown",
            },
            collection_url: match option_env!("PHRASEBOOK_COLLECTION_URL") {
                Some(url) => url,
                None => DEFAULT_COLLECTION_URL,
            },
        }
    }
}

/// `HOSTNAME` from the environment, else `localhost`.
pub fn default_current_host() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub telemetry: TelemetrySettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    pub collection_url: String,
    pub commit_hash: String,
    pub branch: String,
    pub current_host: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Session store location; defaults to the platform data dir.
    #[serde(default)]
    pub session_store_path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_session_store_path(&self) -> Option<PathBuf> {
        self.session_store_path.clone().or_else(default_session_store_path)
    }
}

/// `<data dir>/session` from `directories`.
pub fn default_session_store_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "phrasebook", "phrasebook-telemetry")
        .map(|dirs| dirs.data_dir().join("session"))
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Telemetry(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Telemetry(field, msg) => write!(f, "telemetry.{}: {}", field, msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TelemetrySettings {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let url = self.collection_url.trim();
        if url.is_empty() {
            errors.push(ValidationError::Telemetry(
                "collection_url".to_string(),
                "cannot be empty".to_string(),
            ));
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ValidationError::Telemetry(
                "collection_url".to_string(),
                format!("must start with http:// or https:// (got '{}')", url),
            ));
        }
        if self.commit_hash.trim().is_empty() {
            errors.push(ValidationError::Telemetry(
                "commit_hash".to_string(),
                "cannot be empty".to_string(),
            ));
        }
        if self.branch.trim().is_empty() {
            errors.push(ValidationError::Telemetry(
                "branch".to_string(),
                "cannot be empty".to_string(),
            ));
        }
        errors
    }

    /// Logger-facing view. Strips trailing `/` from the collection URL.
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::new(
            self.collection_url.trim().trim_end_matches('/'),
            self.commit_hash.trim(),
            self.branch.trim(),
            self.current_host.trim(),
        )
    }
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.telemetry.validate();
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds an [`AppConfig`] from defaults, files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    build: BuildInfo,
    global_file: Option<PathBuf>,
    explicit_file: Option<PathBuf>,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            build: BuildInfo::current(),
            global_file: global_config_path(),
            explicit_file: None,
            use_env: true,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load with the standard sources plus an optional explicit file.
    pub fn load(explicit_file: Option<&Path>) -> Result<AppConfig, TelemetryError> {
        let mut loader = Self::new();
        loader.explicit_file = explicit_file.map(Path::to_path_buf);
        loader.build()
    }

    pub fn with_build_info(mut self, build: BuildInfo) -> Self {
        self.build = build;
        self
    }

    pub fn with_global_file(mut self, path: Option<PathBuf>) -> Self {
        self.global_file = path;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    pub fn build(&self) -> Result<AppConfig, TelemetryError> {
        let mut builder = merge::merge_policy::builder_with_defaults(&self.build)?;
        builder = sources::global_file::add_to_builder(builder, self.global_file.clone());
        builder = sources::explicit_file::add_to_builder(builder, self.explicit_file.as_deref());
        if self.use_env {
            builder = sources::env::add_to_builder(builder);
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TelemetryError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
