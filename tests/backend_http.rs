//! Integration tests for the backend boundary.
//!
//! A scripted local TCP server stands in for the inference backends:
//! each test declares the exact HTTP responses the backend will give,
//! then drives a flow end to end through probe, dispatch and fallback.

use capflow::{
    probe, BackendConfig, CaptionClient, CaptionOptions, CaptionOrchestrator, CaptionResult,
    CaptionStyle, DispatchError, FallbackSimulator, LanguageOptions, MediaSource,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Spawn a server that answers one connection per scripted response,
/// in order, reading each request fully before replying.
async fn serve_script(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for response in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let header_end = loop {
                let n = match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
            }

            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn response(status: u16, reason: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn healthy() -> String {
    response(200, "OK", r#"{"status": "healthy"}"#)
}

fn orchestrator(base_url: &str) -> CaptionOrchestrator {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    CaptionOrchestrator::from_parts(
        CaptionClient::new().unwrap(),
        BackendConfig::new(base_url, base_url),
        FallbackSimulator::without_delays(),
    )
}

fn media() -> MediaSource {
    MediaSource::new("clip.mp4", "video/mp4", vec![1u8; 64])
}

#[tokio::test]
async fn probe_accepts_healthy_marker_only() {
    let base = serve_script(vec![
        healthy(),
        response(200, "OK", r#"{"status": "starting"}"#),
        response(500, "Internal Server Error", r#"{"status": "healthy"}"#),
        response(200, "OK", "not json"),
    ])
    .await;

    let client = CaptionClient::new().unwrap();
    let backend = capflow::BackendDescriptor::new(base, "/health");

    assert!(probe(&client, &backend).await);
    assert!(!probe(&client, &backend).await);
    assert!(!probe(&client, &backend).await);
    assert!(!probe(&client, &backend).await);
}

#[tokio::test]
async fn video_summary_uses_live_captions() {
    let base = serve_script(vec![
        healthy(),
        response(
            200,
            "OK",
            r#"{"success": true, "captions": "A quiet walk through the park.",
                "segments": [], "language_detected": "es",
                "message": "Captions generated successfully using translate mode"}"#,
        ),
    ])
    .await;

    let result = orchestrator(&base)
        .summarize_video(&media(), &CaptionOptions::new("en", CaptionStyle::Casual))
        .await;

    assert_eq!(
        result,
        CaptionResult::Single {
            text: "A quiet walk through the park.".to_string(),
            language: "es".to_string(),
        }
    );
}

#[tokio::test]
async fn video_summary_falls_back_on_http_error() {
    let base = serve_script(vec![
        healthy(),
        response(500, "Internal Server Error", r#"{"error": "whisper exploded"}"#),
    ])
    .await;

    let result = orchestrator(&base)
        .summarize_video(&media(), &CaptionOptions::new("en", CaptionStyle::Formal))
        .await;

    let CaptionResult::Single { text, language } = result else {
        panic!("expected single result");
    };
    assert_eq!(language, "en");
    assert!(text.contains("backend not available"));
}

#[tokio::test]
async fn continuous_flow_styles_and_annotates_live_segments() {
    let base = serve_script(vec![
        healthy(),
        response(
            200,
            "OK",
            r#"{"success": true,
                "captions": "",
                "segments": [
                    {"start": 0.0, "end": 4.0, "text": "Hello everyone"},
                    {"start": 4.0, "end": 9.5, "text": "Welcome back"},
                    {"start": 9.5, "end": 14.0, "text": "Let us begin"}
                ],
                "language_detected": "en",
                "message": "ok"}"#,
        ),
    ])
    .await;

    let options = LanguageOptions::new("es", "en", CaptionStyle::Meme);
    let result = orchestrator(&base)
        .continuous_captions(&media(), &options)
        .await;

    let CaptionResult::Segmented { segments, language } = result else {
        panic!("expected segmented result");
    };

    assert_eq!(language, "en");
    assert_eq!(segments.len(), 3);
    for (segment, original) in segments.iter().zip(["Hello everyone", "Welcome back", "Let us begin"])
    {
        // Decorated exactly once: original text, one symbol, one suffix.
        assert!(segment.text.starts_with(original));
        assert!(segment.text.ends_with(" [Translated from es to en]"));
        assert_eq!(segment.text.matches("[Translated").count(), 1);
    }
    assert_eq!(segments[0].display_label(), "00:00:00");
    assert_eq!(segments[2].display_label(), "00:09:00");
}

#[tokio::test]
async fn image_caption_rejection_uses_generic_message() {
    let base = serve_script(vec![
        healthy(),
        response(
            200,
            "OK",
            r#"{"success": false, "message": "model refused the request"}"#,
        ),
    ])
    .await;

    let err = orchestrator(&base)
        .caption_image(&media(), &CaptionOptions::new("en", CaptionStyle::Funny))
        .await
        .unwrap_err();

    // The vision envelope carries no message field, so the rejection
    // falls back to the generic text.
    assert!(matches!(err, DispatchError::ResponseRejected { .. }));
    assert_eq!(err.to_string(), "Failed to generate captions");
}

#[tokio::test]
async fn video_with_captions_reports_http_error_status() {
    let base = serve_script(vec![healthy(), response(503, "Service Unavailable", "{}")]).await;

    let err = orchestrator(&base)
        .video_with_captions(&media())
        .await
        .unwrap_err();

    assert_eq!(err, DispatchError::HttpError { status: 503 });
    assert_eq!(err.to_string(), "HTTP error! status: 503");
}

#[tokio::test]
async fn video_with_captions_joins_download_url() {
    let base = serve_script(vec![
        healthy(),
        response(
            200,
            "OK",
            r#"{"success": true, "output_filename": "captioned_clip.mp4",
                "download_url": "/download/captioned_clip.mp4",
                "captions": "1\n00:00:00,000 --> 00:00:03,000\nhi\n\n",
                "segments": [], "language_detected": "en", "message": "ok"}"#,
        ),
    ])
    .await;

    let video = orchestrator(&base).video_with_captions(&media()).await.unwrap();

    assert_eq!(video.filename, "captioned_clip.mp4");
    assert!(video.download_url.ends_with("/download/captioned_clip.mp4"));
    assert!(video.download_url.starts_with("http://127.0.0.1:"));
}

#[tokio::test]
async fn srt_download_returns_named_blob() {
    let srt_body = "1\n00:00:00,000 --> 00:00:03,000\nhi\n\n";
    let base = serve_script(vec![response(200, "OK", srt_body)]).await;

    let download = orchestrator(&base).download_srt(srt_body).await.unwrap();

    assert_eq!(download.file_name, "captions.srt");
    assert_eq!(download.mime_type, "application/x-subrip");
    assert_eq!(download.bytes, bytes::Bytes::from(srt_body));
}
