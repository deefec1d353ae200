use std::time::Duration;

use phrasebook_telemetry::init_telemetry;
use phrasebook_telemetry::telemetry::is_valid_session_id;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::{isolated_config, wait_for_requests};

async fn collector() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn production_branch_delivers_one_record() {
    let temp_dir = TempDir::new().unwrap();
    let server = collector().await;
    let config = isolated_config(temp_dir.path(), &server.uri(), "main", "phrasebook.dev");
    let logger = init_telemetry(&config);

    logger.log("evt", json!({ "a": 1 }));

    let received = wait_for_requests(&server, 1).await;
    assert_eq!(received.len(), 1);
    let request = &received[0];
    assert_eq!(request.url.path(), "/crp_evt");
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["sessionId"], logger.session_id());
    assert!(is_valid_session_id(body["sessionId"].as_str().unwrap()));
    assert_eq!(body["commitHash"], "abc123");
    assert!(body["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(body["payload"], json!({ "a": 1 }));
}

#[tokio::test]
async fn master_branch_is_production_too() {
    let temp_dir = TempDir::new().unwrap();
    let server = collector().await;
    let config = isolated_config(temp_dir.path(), &server.uri(), "master", "phrasebook.dev");
    let logger = init_telemetry(&config);

    logger.log("pageview", json!(["intro", 3]));

    let received = wait_for_requests(&server, 1).await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/crp_pageview");
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["payload"], json!(["intro", 3]));
}

#[tokio::test]
async fn development_branch_sends_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = collector().await;
    let config = isolated_config(temp_dir.path(), &server.uri(), "develop", "phrasebook.dev");
    let logger = init_telemetry(&config);

    logger.log("evt", json!({ "a": 1 }));
    logger.log_and_wait("evt", json!({ "a": 2 })).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn localhost_only_reaches_a_local_collector() {
    let temp_dir = TempDir::new().unwrap();
    let server = collector().await;

    // MockServer::uri() is 127.0.0.1-based, so this collector does not count as local.
    let remote = isolated_config(temp_dir.path(), &server.uri(), "main", "localhost");
    let logger = init_telemetry(&remote);
    logger.log_and_wait("evt", json!({})).await;
    assert!(server.received_requests().await.unwrap().is_empty());

    let local_url = format!("http://localhost:{}", server.address().port());
    let local = isolated_config(temp_dir.path(), &local_url, "main", "localhost");
    let logger = phrasebook_telemetry::TelemetryLogger::new(
        local.telemetry.to_telemetry_config(),
        "local-session",
        std::sync::Arc::new(phrasebook_telemetry::telemetry::HttpTransport::new().unwrap()),
    );
    logger.log_and_wait("evt", json!({})).await;
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), "/crp_evt");
}

#[tokio::test]
async fn slow_collector_does_not_block_callers() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crp_slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;
    let config = isolated_config(temp_dir.path(), &server.uri(), "main", "phrasebook.dev");
    let logger = init_telemetry(&config);

    let started = std::time::Instant::now();
    for i in 0..20 {
        logger.log("slow", json!({ "i": i }));
    }
    assert!(started.elapsed() < Duration::from_secs(1));

    let received = wait_for_requests(&server, 20).await;
    assert_eq!(received.len(), 20);
}

#[tokio::test]
async fn server_errors_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let config = isolated_config(temp_dir.path(), &server.uri(), "main", "phrasebook.dev");
    let logger = init_telemetry(&config);

    logger.log_and_wait("evt", json!({})).await;
    logger.log("evt", json!({}));

    assert_eq!(wait_for_requests(&server, 2).await.len(), 2);
}
