//! Shared types for caption flows.
//!
//! Contains the option structs chosen by the caller, the segment and
//! result shapes produced by dispatch and simulation, and the media
//! payload as the core sees it. Extracted to avoid tight coupling
//! between the backend boundary and the flow layer.

use bytes::Bytes;

use crate::style::CaptionStyle;

/// Options for the single-caption flows (image caption, video summary).
#[derive(Debug, Clone)]
pub struct CaptionOptions {
    /// BCP-47-ish language tag as the UI passes it (e.g. "en", "es").
    pub language: String,
    pub style: CaptionStyle,
}

impl CaptionOptions {
    #[must_use]
    pub fn new(language: impl Into<String>, style: CaptionStyle) -> Self {
        Self {
            language: language.into(),
            style,
        }
    }
}

/// Options for the continuous-video flow. `output_language` plays the
/// role of [`CaptionOptions::language`]; the pair decides whether the
/// backend is asked to translate or transcribe.
#[derive(Debug, Clone)]
pub struct LanguageOptions {
    pub input_language: String,
    pub output_language: String,
    pub style: CaptionStyle,
}

impl LanguageOptions {
    #[must_use]
    pub fn new(
        input_language: impl Into<String>,
        output_language: impl Into<String>,
        style: CaptionStyle,
    ) -> Self {
        Self {
            input_language: input_language.into(),
            output_language: output_language.into(),
            style,
        }
    }

    /// True when the flow crosses languages and captions must be
    /// annotated as translated.
    #[must_use]
    pub fn is_translation(&self) -> bool {
        self.input_language != self.output_language
    }
}

/// One span of caption text with its start offset.
///
/// Sequences are ordered by non-decreasing start offset; the end of a
/// span is derived from its successor (see [`crate::timing`]).
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    /// Start offset in seconds, non-negative.
    pub start_secs: f64,
    pub text: String,
}

impl CaptionSegment {
    #[must_use]
    pub fn new(start_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            text: text.into(),
        }
    }

    /// On-screen time label for this segment (`MM:SS:00`).
    #[must_use]
    pub fn display_label(&self) -> String {
        crate::timing::display_label(self.start_secs)
    }
}

/// Result of one caption flow invocation.
///
/// Always carries the language actually used: the backend-detected
/// language when one was reported, otherwise the requested one.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionResult {
    /// Whole-media caption (image caption, video summary).
    Single { text: String, language: String },
    /// Timestamped captions (continuous video).
    Segmented {
        segments: Vec<CaptionSegment>,
        language: String,
    },
}

impl CaptionResult {
    /// Language the captions are in.
    #[must_use]
    pub fn language(&self) -> &str {
        match self {
            Self::Single { language, .. } | Self::Segmented { language, .. } => language,
        }
    }
}

/// An uploaded media blob (image or video) as handed in by the caller.
#[derive(Debug, Clone)]
pub struct MediaSource {
    /// Original file name; the backend routes on its extension.
    pub file_name: String,
    /// Content type for preview/download plumbing (e.g. "video/mp4").
    pub mime_type: String,
    pub bytes: Bytes,
}

impl MediaSource {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Payload size in bytes; drives the simulated processing delay.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of the video-with-embedded-subtitles flow.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionedVideo {
    /// Absolute download URL, already joined with the backend base.
    pub download_url: String,
    pub filename: String,
    /// Subtitle text that was burned into the video.
    pub captions: String,
    pub language: String,
}
