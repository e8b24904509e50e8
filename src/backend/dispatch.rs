//! Captioning request dispatch.
//!
//! Builds flow-specific multipart uploads, issues exactly one request,
//! and maps the transport/status/envelope outcome onto the
//! [`DispatchError`] taxonomy. Whether the backend is asked to
//! `translate` or `transcribe` is decided here, per flow.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::envelope::{MediaCaptionEnvelope, VideoWithCaptionsEnvelope, VisionCaptionEnvelope};
use super::{DispatchError, Result};
use crate::client::CaptionClient;
use crate::config::BackendDescriptor;
use crate::types::{
    CaptionOptions, CaptionResult, CaptionSegment, CaptionedVideo, LanguageOptions, MediaSource,
};

const VISION_CAPTION_PATH: &str = "/generate-gemini-caption";
const GENERATE_CAPTIONS_PATH: &str = "/generate-captions";
const VIDEO_WITH_CAPTIONS_PATH: &str = "/generate-video-with-captions";
const DOWNLOAD_SRT_PATH: &str = "/download-srt";

/// Caption a single image (or short clip) via the vision backend.
///
/// Sends `style` and `language` only; the vision backend has no task
/// field.
pub async fn caption_image(
    client: &CaptionClient,
    vision: &BackendDescriptor,
    media: &MediaSource,
    options: &CaptionOptions,
) -> Result<CaptionResult> {
    let form = Form::new()
        .part("file", media_part(media))
        .text("style", options.style.as_str())
        .text("language", options.language.clone());

    let envelope: VisionCaptionEnvelope =
        post_multipart(client, &vision.endpoint(VISION_CAPTION_PATH), form).await?;
    envelope.into_result(&options.language)
}

/// Whole-video summary captions via the media backend.
///
/// Always sends `task=translate` so summaries come back in English
/// regardless of the source audio.
pub async fn video_summary(
    client: &CaptionClient,
    media_backend: &BackendDescriptor,
    media: &MediaSource,
    options: &CaptionOptions,
) -> Result<CaptionResult> {
    let form = Form::new()
        .part("video", media_part(media))
        .text("task", "translate")
        .text("style", options.style.as_str())
        .text("language", options.language.clone());

    let envelope: MediaCaptionEnvelope =
        post_multipart(client, &media_backend.endpoint(GENERATE_CAPTIONS_PATH), form).await?;
    envelope.into_summary(&options.language)
}

/// Timestamped captions for the continuous-video flow, returned as
/// raw ordered segments plus the language used; style decoration is
/// the caller's step.
///
/// Translates only when the explicit input and output languages
/// differ; otherwise transcribes in place.
pub async fn continuous_video(
    client: &CaptionClient,
    media_backend: &BackendDescriptor,
    media: &MediaSource,
    options: &LanguageOptions,
) -> Result<(Vec<CaptionSegment>, String)> {
    let task = if options.is_translation() {
        "translate"
    } else {
        "transcribe"
    };

    let form = Form::new()
        .part("video", media_part(media))
        .text("task", task)
        .text("style", options.style.as_str())
        .text("language", options.output_language.clone());

    let envelope: MediaCaptionEnvelope =
        post_multipart(client, &media_backend.endpoint(GENERATE_CAPTIONS_PATH), form).await?;
    envelope.into_segments(&options.output_language)
}

/// Render the video with embedded subtitles on the media backend.
pub async fn video_with_captions(
    client: &CaptionClient,
    media_backend: &BackendDescriptor,
    media: &MediaSource,
) -> Result<CaptionedVideo> {
    let form = Form::new()
        .part("video", media_part(media))
        .text("task", "translate");

    let envelope: VideoWithCaptionsEnvelope = post_multipart(
        client,
        &media_backend.endpoint(VIDEO_WITH_CAPTIONS_PATH),
        form,
    )
    .await?;
    envelope.into_video(&media_backend.base_url, "en")
}

/// Fetch SRT text back as a downloadable file body.
pub async fn download_srt(
    client: &CaptionClient,
    media_backend: &BackendDescriptor,
    srt_content: &str,
) -> Result<Bytes> {
    let url = media_backend.endpoint(DOWNLOAD_SRT_PATH);
    debug!(url = %url, bytes = srt_content.len(), "requesting SRT download");

    let response = client
        .inner()
        .post(&url)
        .json(&serde_json::json!({ "srt_content": srt_content }))
        .send()
        .await
        .map_err(|e| {
            warn!(url = %url, error = %e, "SRT download request failed to connect");
            DispatchError::NetworkUnavailable
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DispatchError::HttpError {
            status: status.as_u16(),
        });
    }

    response.bytes().await.map_err(|e| {
        warn!(url = %url, error = %e, "SRT download body was cut short");
        DispatchError::NetworkUnavailable
    })
}

/// File part for the upload; the backend routes on the file name's
/// extension.
fn media_part(media: &MediaSource) -> Part {
    Part::bytes(media.bytes.to_vec()).file_name(media.file_name.clone())
}

/// POST a multipart form and validate transport, status, and body
/// shape into the dispatch taxonomy.
async fn post_multipart<T: DeserializeOwned>(
    client: &CaptionClient,
    url: &str,
    form: Form,
) -> Result<T> {
    debug!(url = %url, "dispatching captioning request");

    let response = client
        .inner()
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            warn!(url = %url, error = %e, "captioning request failed to connect");
            DispatchError::NetworkUnavailable
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = %status, "captioning request got error status");
        return Err(DispatchError::HttpError {
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| {
        debug!(url = %url, error = %e, "captioning response body was not a valid envelope");
        DispatchError::rejected(None)
    })
}
