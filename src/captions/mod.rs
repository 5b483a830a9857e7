//! Caption rendering: timestamp formatting and SRT/WebVTT output

use std::path::Path;

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{CaptionSegment, SubtitleFormat};

pub mod render;
pub mod timestamp;

pub use render::{render, render_to_string};
pub use timestamp::format_timestamp;

/// Render `segments` and write them as UTF-8 to `path`
pub async fn write_subtitle_file(
    segments: &[CaptionSegment],
    format: SubtitleFormat,
    path: &Path,
) -> Result<(), DomainError> {
    let body = render_to_string(segments, format);
    tokio::fs::write(path, body)
        .await
        .map_err(|e| DomainError::fs(&format!("writing {}", path.display()), e))?;
    info!(path = %path.display(), cues = segments.len(), format = format.extension(), "subtitles written");
    Ok(())
}
