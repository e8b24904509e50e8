//! Response envelopes for the two backends.
//!
//! The vision and media backends return different loosely-typed JSON
//! shapes; each gets its own validated envelope. Validation happens
//! here, once, and produces either a domain result or a
//! [`DispatchError::ResponseRejected`].

use serde::Deserialize;

use super::{DispatchError, Result};
use crate::types::{CaptionResult, CaptionSegment, CaptionedVideo};

/// Vision backend envelope for `/generate-gemini-caption`.
#[derive(Debug, Deserialize)]
pub struct VisionCaptionEnvelope {
    pub success: Option<bool>,
    pub language: Option<String>,
    pub language_code: Option<String>,
    pub style: Option<String>,
    pub caption: Option<String>,
}

impl VisionCaptionEnvelope {
    /// Validate into a single-caption result.
    pub fn into_result(self, requested_language: &str) -> Result<CaptionResult> {
        if self.success != Some(true) {
            return Err(DispatchError::rejected(None));
        }

        let text = self
            .caption
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DispatchError::rejected(None))?;

        Ok(CaptionResult::Single {
            text,
            language: pick_language(self.language, requested_language),
        })
    }
}

/// One timed span as the media backend reports it.
#[derive(Debug, Deserialize)]
pub struct SegmentEnvelope {
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    pub text: String,
}

/// Media backend envelope for `/generate-captions`.
#[derive(Debug, Deserialize)]
pub struct MediaCaptionEnvelope {
    pub success: Option<bool>,
    pub captions: Option<String>,
    pub segments: Option<Vec<SegmentEnvelope>>,
    pub language_detected: Option<String>,
    pub message: Option<String>,
}

impl MediaCaptionEnvelope {
    fn check_success(&self) -> Result<()> {
        if self.success == Some(true) {
            Ok(())
        } else {
            Err(DispatchError::rejected(self.message.clone()))
        }
    }

    /// Validate into a whole-video summary result (`captions` field).
    pub fn into_summary(self, requested_language: &str) -> Result<CaptionResult> {
        self.check_success()?;

        let text = self
            .captions
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DispatchError::rejected(None))?;

        Ok(CaptionResult::Single {
            text,
            language: pick_language(self.language_detected, requested_language),
        })
    }

    /// Validate into an ordered segment list plus the language used.
    pub fn into_segments(self, requested_language: &str) -> Result<(Vec<CaptionSegment>, String)> {
        self.check_success()?;

        let raw = self
            .segments
            .ok_or_else(|| DispatchError::rejected(None))?;

        let mut segments: Vec<CaptionSegment> = raw
            .into_iter()
            .map(|s| CaptionSegment::new(s.start.max(0.0), s.text))
            .collect();
        // Invariant: non-decreasing start offsets.
        segments.sort_by(|a, b| {
            a.start_secs
                .partial_cmp(&b.start_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok((
            segments,
            pick_language(self.language_detected, requested_language),
        ))
    }
}

/// Media backend envelope for `/generate-video-with-captions`.
#[derive(Debug, Deserialize)]
pub struct VideoWithCaptionsEnvelope {
    pub success: Option<bool>,
    pub output_filename: Option<String>,
    pub download_url: Option<String>,
    pub captions: Option<String>,
    pub language_detected: Option<String>,
    pub message: Option<String>,
}

impl VideoWithCaptionsEnvelope {
    /// Validate into a captioned-video result; the relative download
    /// URL is joined with the backend base address.
    pub fn into_video(self, base_url: &str, requested_language: &str) -> Result<CaptionedVideo> {
        if self.success != Some(true) {
            return Err(DispatchError::rejected(self.message));
        }

        let filename = self
            .output_filename
            .ok_or_else(|| DispatchError::rejected(None))?;
        let download_path = self
            .download_url
            .ok_or_else(|| DispatchError::rejected(None))?;

        Ok(CaptionedVideo {
            download_url: join_download_url(base_url, &download_path),
            filename,
            captions: self.captions.unwrap_or_default(),
            language: pick_language(self.language_detected, requested_language),
        })
    }
}

/// Resolve the backend's relative download path against its base
/// address; plain concatenation covers a base the url crate rejects.
fn join_download_url(base_url: &str, download_path: &str) -> String {
    url::Url::parse(base_url)
        .and_then(|base| base.join(download_path))
        .map(|joined| joined.to_string())
        .unwrap_or_else(|_| format!("{base_url}{download_path}"))
}

/// Detected language when reported, requested language otherwise.
fn pick_language(detected: Option<String>, requested: &str) -> String {
    detected
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| requested.to_string())
}
