//! Backend reachability probe.

use serde::Deserialize;
use tracing::debug;

use crate::client::CaptionClient;
use crate::config::BackendDescriptor;

/// Health endpoint envelope: `{"status": "healthy", ...}`.
#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    #[serde(default)]
    status: String,
}

/// Check whether a backend is reachable and reporting healthy.
///
/// Any transport failure, non-success status, or a body lacking the
/// `"healthy"` marker yields `false`; the probe never errors. Each
/// call is a fresh check, and callers issue at most one per user
/// action to bound added latency.
pub async fn probe(client: &CaptionClient, backend: &BackendDescriptor) -> bool {
    let url = backend.health_url();

    let response = match client.inner().get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(url = %url, error = %e, "health probe failed to connect");
            return false;
        }
    };

    if !response.status().is_success() {
        debug!(url = %url, status = %response.status(), "health probe got non-success status");
        return false;
    }

    match response.json::<HealthEnvelope>().await {
        Ok(envelope) => envelope.status == "healthy",
        Err(e) => {
            debug!(url = %url, error = %e, "health probe body was not a health envelope");
            false
        }
    }
}
