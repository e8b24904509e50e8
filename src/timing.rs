//! Timestamp derivation for caption display and subtitle export.
//!
//! Two label formats exist and are not interchangeable: the display
//! label (`MM:SS:00`, shown next to a caption on screen) and the
//! subtitle label (`HH:MM:SS,mmm` / `HH:MM:SS.mmm`, written into SRT
//! and VTT files). End times are derived numerically from the next
//! segment's start, with proper carry across seconds, minutes and
//! hours.

/// Seconds of screen time granted to the final cue of a sequence.
pub const TAIL_CUE_SECS: f64 = 3.0;

/// Millisecond delimiter used by SRT labels.
pub const SRT_DELIMITER: char = ',';

/// Millisecond delimiter used by VTT labels.
pub const VTT_DELIMITER: char = '.';

/// Format an offset as an on-screen display label: `MM:SS:00`.
///
/// Minutes and seconds are floored and zero-padded; the trailing `:00`
/// field is literal. This label is for display only and never appears
/// in subtitle files.
#[must_use]
pub fn display_label(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes:02}:{seconds:02}:00")
}

/// Format an offset as a subtitle timestamp: `HH:MM:SS{delim}mmm`.
///
/// SRT uses `,` and VTT uses `.` as the millisecond delimiter.
#[must_use]
pub fn subtitle_label(secs: f64, millis_delimiter: char) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{millis_delimiter}{millis:03}")
}

/// Derive `(start, end)` windows for a sequence of segment starts.
///
/// Each segment ends where its successor begins; the last segment gets
/// [`TAIL_CUE_SECS`] of screen time. Arithmetic is numeric, so a final
/// segment starting late in a minute carries into the next minute
/// instead of overflowing the seconds field.
#[must_use]
pub fn cue_windows(starts: &[f64]) -> Vec<(f64, f64)> {
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = match starts.get(i + 1) {
                Some(&next) => next,
                None => start + TAIL_CUE_SECS,
            };
            (start, end)
        })
        .collect()
}
