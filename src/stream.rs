//! Legacy streaming caption generator.
//!
//! Emits a fixed set of demo captions on a steady cadence, used by the
//! image page before single-shot vision captioning existed. The
//! sequence is lazy and cancellable: it ends after [`STREAM_LIMIT`]
//! items or [`STREAM_DEADLINE`] of wall-clock time, whichever comes
//! first, and cancellation stops the underlying timer deterministically.

use std::time::Duration;

use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};

use crate::style::CaptionStyle;
use crate::types::CaptionOptions;

/// Time between emitted captions.
pub const STREAM_CADENCE: Duration = Duration::from_millis(900);

/// Maximum number of captions emitted per stream.
pub const STREAM_LIMIT: usize = 10;

/// Wall-clock ceiling on the whole stream.
pub const STREAM_DEADLINE: Duration = Duration::from_secs(15);

const BASE_CAPTIONS: [&str; 10] = [
    "When you realize it's Monday",
    "That feeling when the code compiles",
    "POV: You added one more feature",
    "Me trying to act normal after coffee",
    "Caption generator: activated",
    "Plot twist: it's a template",
    "Still looks good though",
    "Frames dropping — memes rising",
    "Keep calm and ship it",
    "AI said: 'Do the thing'",
];

/// A bounded, cancellable sequence of caption strings.
///
/// Non-meme styles are prefixed with their name and non-English
/// languages suffixed, so the demo output reflects the chosen options.
#[derive(Debug)]
pub struct CaptionStream {
    prefix: String,
    suffix: String,
    emitted: usize,
    cancelled: bool,
    interval: Interval,
    deadline: Instant,
}

impl CaptionStream {
    #[must_use]
    pub fn new(options: &CaptionOptions) -> Self {
        let prefix = if options.style == CaptionStyle::Meme {
            String::new()
        } else {
            format!("[{}] ", options.style.as_str())
        };
        let suffix = if options.language == "en" {
            String::new()
        } else {
            format!(" ({})", options.language)
        };

        let start = Instant::now();
        let mut interval = interval_at(start + STREAM_CADENCE, STREAM_CADENCE);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            prefix,
            suffix,
            emitted: 0,
            cancelled: false,
            interval,
            deadline: start + STREAM_DEADLINE,
        }
    }

    /// Next caption, or `None` once the stream has ended.
    ///
    /// Waits out the cadence; resolves to `None` immediately when the
    /// stream was cancelled, exhausted, or the deadline has passed.
    pub async fn next(&mut self) -> Option<String> {
        if self.cancelled || self.emitted >= STREAM_LIMIT {
            return None;
        }

        tokio::select! {
            biased;

            () = sleep_until(self.deadline) => {
                self.cancel();
                None
            }
            _ = self.interval.tick() => {
                let caption = BASE_CAPTIONS[self.emitted % BASE_CAPTIONS.len()];
                self.emitted += 1;
                Some(format!("{}{}{}", self.prefix, caption, self.suffix))
            }
        }
    }

    /// Stop the stream; every later `next` resolves to `None` without
    /// touching the timer again.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Number of captions emitted so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(language: &str, style: CaptionStyle) -> CaptionOptions {
        CaptionOptions::new(language, style)
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_exactly_ten_captions_then_ends() {
        let mut stream = CaptionStream::new(&options("en", CaptionStyle::Meme));

        let mut captions = Vec::new();
        while let Some(caption) = stream.next().await {
            captions.push(caption);
        }

        assert_eq!(captions.len(), STREAM_LIMIT);
        assert_eq!(captions[0], "When you realize it's Monday");
        assert_eq!(stream.emitted(), STREAM_LIMIT);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_style_prefix_and_language_suffix() {
        let mut stream = CaptionStream::new(&options("es", CaptionStyle::Casual));
        let first = stream.next().await.unwrap();
        assert_eq!(first, "[casual] When you realize it's Monday (es)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_meme_style_has_no_prefix() {
        let mut stream = CaptionStream::new(&options("en", CaptionStyle::Meme));
        let first = stream.next().await.unwrap();
        assert!(!first.starts_with('['));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_the_stream() {
        let mut stream = CaptionStream::new(&options("en", CaptionStyle::Meme));
        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_some());

        stream.cancel();
        assert!(stream.next().await.is_none());
        assert_eq!(stream.emitted(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_ends_a_stalled_stream() {
        let mut stream = CaptionStream::new(&options("en", CaptionStyle::Meme));
        assert!(stream.next().await.is_some());

        // Consumer stalls past the wall-clock ceiling.
        tokio::time::advance(STREAM_DEADLINE + Duration::from_secs(1)).await;
        assert!(stream.next().await.is_none());
    }
}
