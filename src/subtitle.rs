//! Subtitle serialization from timed captions.
//!
//! Renders ordered cues into SRT and WebVTT text and packages the
//! result as a named downloadable blob. Cues are derived from caption
//! segments, never constructed by callers directly.

use bytes::Bytes;

use crate::timing::{self, SRT_DELIMITER, VTT_DELIMITER};
use crate::types::CaptionSegment;

/// Subtitle format type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtitleFormat {
    /// `SubRip` format (.srt) - simple, widely compatible
    #[default]
    Srt,
    /// `WebVTT` format (.vtt) - web standard
    Vtt,
}

impl SubtitleFormat {
    /// Get file extension for this format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    /// Content type for the downloadable artifact.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Srt => "application/x-subrip",
            Self::Vtt => "text/vtt",
        }
    }

    /// Millisecond delimiter used in this format's timestamps.
    #[must_use]
    pub fn millis_delimiter(&self) -> char {
        match self {
            Self::Srt => SRT_DELIMITER,
            Self::Vtt => VTT_DELIMITER,
        }
    }

    /// Default download file name (`captions.srt` / `captions.vtt`).
    #[must_use]
    pub fn download_name(&self) -> String {
        format!("captions.{}", self.extension())
    }
}

/// A single timed cue. Times are numeric seconds; labels are produced
/// at render time in the target format.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    pub start_secs: f64,
    pub end_secs: f64,
    pub text: String,
}

impl SubtitleCue {
    #[must_use]
    pub fn new(start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }
}

/// Derive cues from an ordered segment sequence.
///
/// Each cue ends where the next segment starts; the last cue runs
/// [`timing::TAIL_CUE_SECS`] past its own start.
#[must_use]
pub fn cues_from_segments(segments: &[CaptionSegment]) -> Vec<SubtitleCue> {
    let starts: Vec<f64> = segments.iter().map(|s| s.start_secs).collect();
    timing::cue_windows(&starts)
        .into_iter()
        .zip(segments)
        .map(|((start, end), segment)| SubtitleCue::new(start, end, segment.text.clone()))
        .collect()
}

/// Render cues as SRT: numbered blocks with `,`-delimited timestamps.
///
/// An empty cue list renders as an empty string.
#[must_use]
pub fn to_srt(cues: &[SubtitleCue]) -> String {
    let mut output = String::new();

    for (i, cue) in cues.iter().enumerate() {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            timing::subtitle_label(cue.start_secs, SRT_DELIMITER),
            timing::subtitle_label(cue.end_secs, SRT_DELIMITER),
            cue.text
        ));
    }

    output
}

/// Render cues as WebVTT: header plus unnumbered blocks with
/// `.`-delimited timestamps. The header is emitted even for zero cues.
#[must_use]
pub fn to_vtt(cues: &[SubtitleCue]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for cue in cues {
        output.push_str(&format!(
            "{} --> {}\n{}\n\n",
            timing::subtitle_label(cue.start_secs, VTT_DELIMITER),
            timing::subtitle_label(cue.end_secs, VTT_DELIMITER),
            cue.text
        ));
    }

    output
}

/// A downloadable subtitle artifact.
#[derive(Debug, Clone)]
pub struct SubtitleDownload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Bytes,
}

impl SubtitleDownload {
    /// Package already-rendered subtitle text under the standard
    /// download name for its format.
    #[must_use]
    pub fn from_text(format: SubtitleFormat, text: impl Into<String>) -> Self {
        Self {
            file_name: format.download_name(),
            mime_type: format.mime_type(),
            bytes: Bytes::from(text.into()),
        }
    }
}

/// Render segments straight to a downloadable blob in one step.
#[must_use]
pub fn render_download(format: SubtitleFormat, segments: &[CaptionSegment]) -> SubtitleDownload {
    let cues = cues_from_segments(segments);
    let text = match format {
        SubtitleFormat::Srt => to_srt(&cues),
        SubtitleFormat::Vtt => to_vtt(&cues),
    };
    SubtitleDownload::from_text(format, text)
}
