//! Best-effort dispatch: every failure is traced and dropped.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::telemetry::emission::transport::Transport;

/// Send and swallow the outcome.
pub async fn deliver(transport: Arc<dyn Transport>, url: String, body: String) {
    if let Err(err) = transport.send(&url, body).await {
        debug!(url = %url, error = %err, "telemetry delivery failed");
    }
}

/// Spawn `deliver` on the ambient runtime without waiting for it.
/// Returns `None` (and drops the record) when no runtime is running.
pub fn spawn_delivery(
    transport: Arc<dyn Transport>,
    url: String,
    body: String,
) -> Option<JoinHandle<()>> {
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(deliver(transport, url, body))),
        Err(_) => {
            debug!(url = %url, "no async runtime; telemetry record dropped");
            None
        }
    }
}
