//! Backend boundary: reachability probing, request dispatch, and
//! response envelope validation.
//!
//! Everything that crosses the wire lives here. Loosely-typed JSON
//! envelopes from the two backends are validated into domain results
//! at this boundary; malformed payloads are rejected rather than
//! forwarded with missing fields.

pub mod dispatch;
pub mod envelope;
pub mod probe;

use thiserror::Error;

pub use dispatch::{
    caption_image, continuous_video, download_srt, video_summary, video_with_captions,
};
pub use envelope::{MediaCaptionEnvelope, VisionCaptionEnvelope, VideoWithCaptionsEnvelope};
pub use probe::probe;

/// Default message when a backend rejects a request without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to generate captions";

/// Dispatch failure taxonomy.
///
/// The `Display` text doubles as the user-facing message for flows
/// without a fallback; a rejection message from the backend is shown
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Backend server is not available. Please start the backend server first.")]
    NetworkUnavailable,

    #[error("HTTP error! status: {status}")]
    HttpError { status: u16 },

    #[error("{message}")]
    ResponseRejected { message: String },
}

impl DispatchError {
    /// Rejection carrying the envelope's own message when present.
    #[must_use]
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
        Self::ResponseRejected { message }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_envelope_message_verbatim() {
        let err = DispatchError::rejected(Some("No video file uploaded".to_string()));
        assert_eq!(err.to_string(), "No video file uploaded");
    }

    #[test]
    fn test_rejected_defaults_when_message_absent_or_empty() {
        assert_eq!(
            DispatchError::rejected(None).to_string(),
            DEFAULT_REJECTION_MESSAGE
        );
        assert_eq!(
            DispatchError::rejected(Some(String::new())).to_string(),
            DEFAULT_REJECTION_MESSAGE
        );
    }

    #[test]
    fn test_http_error_names_the_status() {
        let err = DispatchError::HttpError { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }
}
