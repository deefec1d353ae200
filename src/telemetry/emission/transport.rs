//! Outbound delivery of serialized records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::TelemetryError;

const COLLECTOR_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const COLLECTOR_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers one JSON body to one URL. Callers treat every error as non-fatal.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, body: String) -> Result<(), TelemetryError>;
}

/// HTTP POST transport. The response status and body are not inspected.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TelemetryError> {
        let client = Client::builder()
            .connect_timeout(COLLECTOR_HTTP_CONNECT_TIMEOUT)
            .timeout(COLLECTOR_HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                TelemetryError::TransportError(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Like [`HttpTransport::new`], but falls back to a default client without timeouts.
    pub fn best_effort() -> Self {
        Self::new().unwrap_or_else(|err| {
            warn!(error = %err, "using default HTTP client for telemetry");
            Self::with_client(Client::new())
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str, body: String) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        debug!(url = %url, status = %response.status(), "collector responded");
        Ok(())
    }
}
