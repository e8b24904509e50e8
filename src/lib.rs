//! `capflow` - Caption orchestration and subtitle serialization
//!
//! # Features
//!
//! - **Backend dispatch**: health-probed captioning requests against a
//!   media backend (transcription/translation) and a vision backend
//!   (single-shot captioning)
//! - **Local fallback**: deterministic simulated captions when no
//!   backend is reachable, structurally identical to live results
//! - **Style decoration**: meme/aesthetic palettes, formal
//!   substitutions, translation annotation
//! - **Subtitle export**: SRT and WebVTT rendering with derived cue
//!   timing
//!
//! # Example
//!
//! ```rust,no_run
//! use capflow::{CaptionOptions, CaptionOrchestrator, CaptionStyle, MediaSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = CaptionOrchestrator::new()?;
//!     let video = MediaSource::new("talk.mp4", "video/mp4", std::fs::read("talk.mp4")?);
//!
//!     let summary = orchestrator
//!         .summarize_video(&video, &CaptionOptions::new("en", CaptionStyle::Casual))
//!         .await;
//!     println!("{summary:?}");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod flow;
pub mod simulate;
pub mod stream;
pub mod style;
pub mod subtitle;
pub mod timing;
pub mod types;

pub use backend::{probe, DispatchError};
pub use client::CaptionClient;
pub use config::{BackendConfig, BackendDescriptor};
pub use flow::CaptionOrchestrator;
pub use simulate::FallbackSimulator;
pub use stream::CaptionStream;
pub use style::{apply_style, CaptionStyle, StyleRules};
pub use subtitle::{
    cues_from_segments, render_download, to_srt, to_vtt, SubtitleCue, SubtitleDownload,
    SubtitleFormat,
};
pub use types::{
    CaptionOptions, CaptionResult, CaptionSegment, CaptionedVideo, LanguageOptions, MediaSource,
};

/// Version of capflow
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
