//! Shared test utilities for integration tests

use std::path::Path;
use std::time::Duration;

use phrasebook_telemetry::config::{AppConfig, ConfigLoader};
use wiremock::{MockServer, Request};

/// Config isolated from the user's files and environment, with the session store under `dir`.
pub fn isolated_config(dir: &Path, collection_url: &str, branch: &str, host: &str) -> AppConfig {
    let mut config = ConfigLoader::new()
        .with_global_file(None)
        .with_env(false)
        .build()
        .unwrap();
    config.telemetry.collection_url = collection_url.to_string();
    config.telemetry.commit_hash = "abc123".to_string();
    config.telemetry.branch = branch.to_string();
    config.telemetry.current_host = host.to_string();
    config.storage.session_store_path = Some(dir.join("session"));
    config
}

/// Poll the mock server until it has seen `count` requests or the deadline passes.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count || tokio::time::Instant::now() >= deadline {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
