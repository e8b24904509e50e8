//! Local caption simulation.
//!
//! The guaranteed terminal path: when no backend is reachable or a
//! dispatch fails, flows that declare a fallback synthesize a result
//! locally from a fixed library, structurally identical to a live
//! result. Simulation never fails and never re-contacts a backend.
//!
//! A short artificial delay mimics processing time so the UI does not
//! flash; it is a UX affordance only and tests disable it.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::style::{apply_style, CaptionStyle, StyleRules};
use crate::types::{CaptionOptions, CaptionResult, CaptionSegment, LanguageOptions, MediaSource};

/// Appended to every simulated caption so a degraded result is never
/// mistaken for backend output.
pub const OFFLINE_MARKER: &str = "(simulated - backend not available)";

/// Canned whole-video summaries, one per style.
fn summary_for(style: CaptionStyle) -> &'static str {
    match style {
        CaptionStyle::Funny => {
            "A hilarious and witty take on this content — guaranteed to make you laugh! 😄"
        }
        CaptionStyle::Meme => "A hilarious montage of real-life coding chaos — perfect for sharing.",
        CaptionStyle::Casual => "A relaxed walkthrough of key moments with friendly commentary.",
        CaptionStyle::Formal => "A concise summary highlighting the main scenes and dialogue.",
        CaptionStyle::Aesthetic => "A moody and cinematic recap emphasizing visuals and tone.",
    }
}

/// Fixed continuous-video script: preset start offsets plus one line
/// of narration each.
const CONTINUOUS_SCRIPT: [(f64, &str); 10] = [
    (0.0, "Welcome to our presentation on automated caption generation."),
    (5.0, "Today we will explore how AI can transform video content."),
    (12.0, "First, let's look at the current challenges in video captioning."),
    (18.0, "Manual captioning is time-consuming and expensive."),
    (24.0, "Our AI solution provides fast, accurate, multilingual captions."),
    (30.0, "The system supports over 50 languages for input and output."),
    (36.0, "Users can select different caption styles for various audiences."),
    (42.0, "The technology uses advanced speech recognition and translation."),
    (48.0, "Quality is maintained even when translating between languages."),
    (54.0, "Export options include SRT, VTT, and other popular formats."),
];

/// Deterministic local stand-in for the captioning backends.
#[derive(Debug, Clone)]
pub struct FallbackSimulator {
    delays_enabled: bool,
}

impl Default for FallbackSimulator {
    fn default() -> Self {
        Self {
            delays_enabled: true,
        }
    }
}

impl FallbackSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator that responds immediately. For tests.
    #[must_use]
    pub fn without_delays() -> Self {
        Self {
            delays_enabled: false,
        }
    }

    /// Simulate a whole-video summary.
    ///
    /// The language is the requested one, unchanged; a non-English
    /// request gets a bracketed language tag the way a live summary
    /// would come back localized.
    pub async fn video_summary<R: Rng + ?Sized>(
        &self,
        options: &CaptionOptions,
        rng: &mut R,
    ) -> CaptionResult {
        if self.delays_enabled {
            let millis = 2200 + rng.gen_range(0..1800);
            sleep(Duration::from_millis(millis)).await;
        }

        let mut text = summary_for(options.style).to_string();
        if options.language != "en" {
            text.push_str(&format!(" [{}]", options.language));
        }
        text.push_str(&format!(" {OFFLINE_MARKER}"));

        let text = apply_style(
            &text,
            options.style,
            StyleRules::fallback(),
            &options.language,
            &options.language,
            rng,
        );

        CaptionResult::Single {
            text,
            language: options.language.clone(),
        }
    }

    /// Simulate continuous timestamped captions from the fixed script.
    ///
    /// Each entry is style-decorated exactly once with the fallback
    /// rule set and annotated as translated when the languages differ.
    pub async fn continuous_captions<R: Rng + ?Sized>(
        &self,
        media: &MediaSource,
        options: &LanguageOptions,
        rng: &mut R,
    ) -> CaptionResult {
        if self.delays_enabled {
            sleep(processing_delay(media.size_bytes())).await;
        }

        let segments = CONTINUOUS_SCRIPT
            .iter()
            .map(|&(start, line)| {
                let text = apply_style(
                    &format!("{line} {OFFLINE_MARKER}"),
                    options.style,
                    StyleRules::fallback(),
                    &options.input_language,
                    &options.output_language,
                    rng,
                );
                CaptionSegment::new(start, text)
            })
            .collect();

        CaptionResult::Segmented {
            segments,
            language: options.output_language.clone(),
        }
    }
}

/// Simulated processing time grows with upload size, capped so large
/// files do not stall the UI: `min(MB * 500ms, 5s) + 2s`.
fn processing_delay(size_bytes: usize) -> Duration {
    let scaled = (size_bytes as f64 / 1_000_000.0 * 500.0).min(5000.0) + 2000.0;
    Duration::from_millis(scaled as u64)
}
