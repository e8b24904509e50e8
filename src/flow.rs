//! Caption flow orchestration.
//!
//! One entry point per flow, each running the same sequence: probe the
//! backend once, dispatch exactly once if reachable, and either
//! degrade to the local simulator (flows with a fallback) or surface
//! the dispatch error (flows without one). The fallback is the only
//! retry mechanism and never re-contacts a backend.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{instrument, warn};

use crate::backend::{self, probe, DispatchError};
use crate::client::CaptionClient;
use crate::config::BackendConfig;
use crate::simulate::FallbackSimulator;
use crate::style::{apply_style, StyleRules};
use crate::subtitle::{SubtitleDownload, SubtitleFormat};
use crate::types::{
    CaptionOptions, CaptionResult, CaptionSegment, CaptionedVideo, LanguageOptions, MediaSource,
};

/// Orchestrates caption flows against the configured backends.
///
/// Holds only immutable configuration and a pooled client handle, so
/// independent invocations can run concurrently without shared
/// mutable state.
#[derive(Debug, Clone)]
pub struct CaptionOrchestrator {
    client: CaptionClient,
    config: BackendConfig,
    simulator: FallbackSimulator,
}

impl CaptionOrchestrator {
    /// Orchestrator against the default backend addresses.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(BackendConfig::default())
    }

    /// Orchestrator against explicit backend addresses.
    pub fn with_config(config: BackendConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: CaptionClient::new()?,
            config,
            simulator: FallbackSimulator::new(),
        })
    }

    /// Assemble from pre-built parts. Used by tests to disable the
    /// simulator's artificial delay.
    #[must_use]
    pub fn from_parts(
        client: CaptionClient,
        config: BackendConfig,
        simulator: FallbackSimulator,
    ) -> Self {
        Self {
            client,
            config,
            simulator,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Caption an image via the vision backend.
    ///
    /// No fallback: an unreachable backend or failed dispatch surfaces
    /// as an error whose `Display` text is the user-facing message.
    #[instrument(skip(self, media, options), fields(file = %media.file_name))]
    pub async fn caption_image(
        &self,
        media: &MediaSource,
        options: &CaptionOptions,
    ) -> backend::Result<CaptionResult> {
        if !probe(&self.client, &self.config.vision).await {
            return Err(DispatchError::NetworkUnavailable);
        }

        backend::caption_image(&self.client, &self.config.vision, media, options).await
    }

    /// Whole-video summary via the media backend, simulated when the
    /// backend is unreachable or the dispatch fails.
    #[instrument(skip(self, media, options), fields(file = %media.file_name))]
    pub async fn summarize_video(
        &self,
        media: &MediaSource,
        options: &CaptionOptions,
    ) -> CaptionResult {
        let mut rng = StdRng::from_entropy();

        if !probe(&self.client, &self.config.media).await {
            warn!("media backend unreachable, simulating video summary");
            return self.simulator.video_summary(options, &mut rng).await;
        }

        match backend::video_summary(&self.client, &self.config.media, media, options).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "video summary dispatch failed, simulating");
                self.simulator.video_summary(options, &mut rng).await
            }
        }
    }

    /// Continuous timestamped captions via the media backend,
    /// simulated on unreachability or failure.
    ///
    /// Live segments are style-decorated here, exactly once each, with
    /// the live rule set; the simulator decorates its own output with
    /// the fallback rule set.
    #[instrument(skip(self, media, options), fields(file = %media.file_name))]
    pub async fn continuous_captions(
        &self,
        media: &MediaSource,
        options: &LanguageOptions,
    ) -> CaptionResult {
        let mut rng = StdRng::from_entropy();

        if !probe(&self.client, &self.config.media).await {
            warn!("media backend unreachable, simulating continuous captions");
            return self
                .simulator
                .continuous_captions(media, options, &mut rng)
                .await;
        }

        match backend::continuous_video(&self.client, &self.config.media, media, options).await {
            Ok((segments, language)) => {
                let segments = segments
                    .into_iter()
                    .map(|segment| {
                        let text = apply_style(
                            &segment.text,
                            options.style,
                            StyleRules::live(),
                            &options.input_language,
                            &options.output_language,
                            &mut rng,
                        );
                        CaptionSegment::new(segment.start_secs, text)
                    })
                    .collect();

                CaptionResult::Segmented { segments, language }
            }
            Err(e) => {
                warn!(error = %e, "continuous caption dispatch failed, simulating");
                self.simulator
                    .continuous_captions(media, options, &mut rng)
                    .await
            }
        }
    }

    /// Render the video with embedded subtitles. No fallback: the
    /// artifact only exists if the media backend produced it.
    #[instrument(skip(self, media), fields(file = %media.file_name))]
    pub async fn video_with_captions(
        &self,
        media: &MediaSource,
    ) -> backend::Result<CaptionedVideo> {
        if !probe(&self.client, &self.config.media).await {
            return Err(DispatchError::NetworkUnavailable);
        }

        backend::video_with_captions(&self.client, &self.config.media, media).await
    }

    /// Fetch SRT text back from the media backend as a downloadable
    /// `captions.srt` blob.
    pub async fn download_srt(&self, srt_content: &str) -> backend::Result<SubtitleDownload> {
        let bytes = backend::download_srt(&self.client, &self.config.media, srt_content).await?;
        Ok(SubtitleDownload {
            file_name: SubtitleFormat::Srt.download_name(),
            mime_type: SubtitleFormat::Srt.mime_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::OFFLINE_MARKER;
    use crate::style::CaptionStyle;

    /// Config whose backends refuse connections.
    fn unreachable_config() -> BackendConfig {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        BackendConfig::new(
            format!("http://127.0.0.1:{port}"),
            format!("http://127.0.0.1:{port}"),
        )
    }

    fn orchestrator() -> CaptionOrchestrator {
        CaptionOrchestrator::from_parts(
            CaptionClient::new().unwrap(),
            unreachable_config(),
            FallbackSimulator::without_delays(),
        )
    }

    fn media() -> MediaSource {
        MediaSource::new("clip.mp4", "video/mp4", vec![0u8; 16])
    }

    #[tokio::test]
    async fn test_image_captioning_surfaces_unreachable_backend() {
        let err = orchestrator()
            .caption_image(&media(), &CaptionOptions::new("en", CaptionStyle::Funny))
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::NetworkUnavailable);
        assert!(err.to_string().contains("not available"));
    }

    #[tokio::test]
    async fn test_video_summary_degrades_to_simulation() {
        let result = orchestrator()
            .summarize_video(&media(), &CaptionOptions::new("en", CaptionStyle::Casual))
            .await;

        let CaptionResult::Single { text, language } = result else {
            panic!("expected single result");
        };
        assert_eq!(language, "en");
        assert!(text.contains(OFFLINE_MARKER));
    }

    #[tokio::test]
    async fn test_continuous_flow_degrades_to_simulation() {
        let options = LanguageOptions::new("es", "en", CaptionStyle::Meme);
        let result = orchestrator().continuous_captions(&media(), &options).await;

        let CaptionResult::Segmented { segments, language } = result else {
            panic!("expected segmented result");
        };
        assert_eq!(language, "en");
        assert_eq!(segments.len(), 10);
        for segment in &segments {
            assert!(segment.text.ends_with(" [Translated from es to en]"));
        }
    }

    #[tokio::test]
    async fn test_video_with_captions_has_no_fallback() {
        let err = orchestrator()
            .video_with_captions(&media())
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::NetworkUnavailable);
    }
}
