//! Integration tests for the phrasebook telemetry client

mod cli_commands;
mod collector_delivery;
mod test_utils;

pub use test_utils::*;
