//! Merge rules: defaults first, then files, then environment.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{default_current_host, BuildInfo};

/// Create a Config builder with defaults seeded from build-time values.
pub fn builder_with_defaults(
    build: &BuildInfo,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("telemetry.collection_url", build.collection_url)?
        .set_default("telemetry.commit_hash", build.commit_hash)?
        .set_default("telemetry.branch", build.branch)?
        .set_default("telemetry.current_host", default_current_host())
}
