//! Subtitle timestamp formatting

use crate::domain::model::SubtitleFormat;

/// Format `seconds` as `HH:MM:SS,mmm` (SRT) or `HH:MM:SS.mmm` (WebVTT).
///
/// Every field is truncated, never rounded. Hours grow past two digits when
/// needed. Negative and non-finite input is treated as zero.
pub fn format_timestamp(seconds: f64, format: SubtitleFormat) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let millis = (((seconds % 1.0) * 1000.0).floor() as u64).min(999);

    let separator = match format {
        SubtitleFormat::Srt => ',',
        SubtitleFormat::WebVtt => '.',
    };
    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, secs, separator, millis
    )
}
