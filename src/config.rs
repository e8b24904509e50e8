//! Backend configuration.
//!
//! Two independent backends exist and are never conflated: the media
//! backend (video/image transcription and translation, multi-endpoint)
//! and the vision backend (single-shot captioning). Addresses are an
//! immutable value injected into the orchestrator at construction, not
//! ambient globals.

/// Default media backend address (transcription / translation).
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:5000";

/// Default vision backend address (single-shot captioning).
pub const DEFAULT_VISION_BASE_URL: &str = "http://localhost:5001";

/// One reachable inference backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Base address, scheme + host + port, no trailing slash.
    pub base_url: String,
    /// Path of the reachability check endpoint.
    pub health_path: String,
}

impl BackendDescriptor {
    #[must_use]
    pub fn new(base_url: impl Into<String>, health_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            health_path: health_path.into(),
        }
    }

    /// Full URL of the health endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, self.health_path)
    }

    /// Join an endpoint path onto the base address.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Immutable pair of backend descriptors owned by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub media: BackendDescriptor,
    pub vision: BackendDescriptor,
}

impl BackendConfig {
    /// Config with explicit base addresses and the standard `/health`
    /// reachability path.
    #[must_use]
    pub fn new(media_base_url: impl Into<String>, vision_base_url: impl Into<String>) -> Self {
        Self {
            media: BackendDescriptor::new(media_base_url, "/health"),
            vision: BackendDescriptor::new(vision_base_url, "/health"),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_BASE_URL, DEFAULT_VISION_BASE_URL)
    }
}
