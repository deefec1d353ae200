use std::sync::Arc;

use phrasebook_telemetry::cli::{map_error, Commands, RunContext};
use phrasebook_telemetry::telemetry::{is_valid_session_id, HttpTransport};
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::isolated_config;

fn context(dir: &std::path::Path, url: &str, branch: &str) -> RunContext {
    let config = isolated_config(dir, url, branch, "phrasebook.dev");
    RunContext::from_config(config, Arc::new(HttpTransport::best_effort()))
}

#[tokio::test]
async fn session_prints_a_uuid() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "main");
    let output = ctx.execute(&Commands::Session).await.unwrap();
    assert!(is_valid_session_id(&output), "got {}", output);
}

#[tokio::test]
async fn session_marks_id_when_storage_is_unusable() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    // Store path lands under a regular file, so it can never be opened.
    let ctx = context(&blocker, "https://collector.test", "main");

    let output = ctx.execute(&Commands::Session).await.unwrap();
    let (id, note) = output.split_once(' ').unwrap();
    assert!(is_valid_session_id(id), "got {}", output);
    assert_eq!(note, "(not persisted: session storage unavailable)");
}

#[tokio::test]
async fn reset_session_succeeds_on_fresh_store() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "main");
    let output = ctx.execute(&Commands::ResetSession).await.unwrap();
    assert_eq!(output, "session id cleared");
}

#[tokio::test]
async fn gate_reports_branch_suppression() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "develop");
    let output = ctx.execute(&Commands::Gate).await.unwrap();
    assert!(output.starts_with("decision: non_production_branch"));
    assert!(output.contains("branch: develop"));
}

#[tokio::test]
async fn send_delivers_before_returning() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crp_cli"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let ctx = context(temp_dir.path(), &server.uri(), "main");

    let output = ctx
        .execute(&Commands::Send {
            endpoint: "cli".to_string(),
            payload: Some(r#"{"chapter":"iterators"}"#.to_string()),
        })
        .await
        .unwrap();
    assert_eq!(output, format!("dispatched to {}/crp_cli", server.uri()));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["payload"]["chapter"], "iterators");
}

#[tokio::test]
async fn send_defaults_to_empty_object() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let ctx = context(temp_dir.path(), &server.uri(), "main");

    ctx.execute(&Commands::Send {
        endpoint: "ping".to_string(),
        payload: None,
    })
    .await
    .unwrap();
    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["payload"], serde_json::json!({}));
}

#[tokio::test]
async fn send_rejects_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "main");
    let err = ctx
        .execute(&Commands::Send {
            endpoint: "evt".to_string(),
            payload: Some("{not json".to_string()),
        })
        .await
        .unwrap_err();
    assert!(map_error(&err).starts_with("Invalid JSON payload"));
}

#[tokio::test]
async fn suppressed_send_says_why() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "develop");
    let output = ctx
        .execute(&Commands::Send {
            endpoint: "evt".to_string(),
            payload: None,
        })
        .await
        .unwrap();
    assert_eq!(output, "suppressed (non_production_branch)");
}

#[tokio::test]
async fn config_renders_as_toml() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(temp_dir.path(), "https://collector.test", "main");
    let output = ctx.execute(&Commands::Config).await.unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["telemetry"]["branch"].as_str(), Some("main"));
    assert_eq!(
        parsed["telemetry"]["collection_url"].as_str(),
        Some("https://collector.test")
    );
}
