//! SRT and WebVTT rendering

use std::io::{self, Write};

use crate::captions::timestamp::format_timestamp;
use crate::domain::model::{CaptionSegment, SubtitleFormat};

/// Render segments in the order given. Cue text is trimmed and otherwise
/// written verbatim.
pub fn render_to_string(segments: &[CaptionSegment], format: SubtitleFormat) -> String {
    let mut out = String::new();
    if format == SubtitleFormat::WebVtt {
        out.push_str("WEBVTT\n\n");
    }

    for (index, segment) in segments.iter().enumerate() {
        if format == SubtitleFormat::Srt {
            out.push_str(&format!("{}\n", index + 1));
        }
        out.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(segment.start, format),
            format_timestamp(segment.end, format),
            segment.text.trim()
        ));
    }
    out
}

/// Render into any byte sink
pub fn render<W: Write>(
    segments: &[CaptionSegment],
    format: SubtitleFormat,
    sink: &mut W,
) -> io::Result<()> {
    sink.write_all(render_to_string(segments, format).as_bytes())?;
    sink.flush()
}
