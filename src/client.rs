//! HTTP client for backend traffic.
//!
//! One pooled client is shared by every flow invocation. Connections
//! are kept alive between the probe and the dispatch that follows it,
//! and the HTTP version is negotiated per backend. No request-level
//! timeout is set: transcription of a long video legitimately takes
//! minutes, so only connection establishment is bounded.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

/// Pooled HTTP client handle. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct CaptionClient {
    client: Client,
}

impl CaptionClient {
    /// Create a new client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            // Let the server negotiate the HTTP version; the local
            // inference backends speak HTTP/1.1.
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

impl Default for CaptionClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default client")
    }
}
