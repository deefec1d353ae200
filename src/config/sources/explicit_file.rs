//! Explicit config file source (`--config`). Must exist when given.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder,
    }
}
