//! ffmpeg argument builders
//!
//! Every builder starts with `-hide_banner -y` and ends with the output
//! path. Times are written in seconds with millisecond precision.

use std::path::Path;

use crate::domain::model::{whole_millis, TimeRange};
use crate::ports::{Invocation, Tool};
use crate::utils::path::PathUtils;

/// Builders for the ffmpeg invocations the engine issues
pub struct FfmpegCommands;

impl FfmpegCommands {
    fn base() -> Invocation {
        Invocation::new(Tool::Ffmpeg).arg("-hide_banner").arg("-y")
    }

    fn seconds(value: f64) -> String {
        let millis = whole_millis(value);
        format!("{}.{:03}", millis / 1000, millis % 1000)
    }

    /// Stream-copy `range` of `input` into `output`
    pub fn extract(input: &Path, range: &TimeRange, output: &Path) -> Invocation {
        Self::base()
            .arg("-ss")
            .arg(Self::seconds(range.start))
            .arg("-to")
            .arg(Self::seconds(range.end))
            .arg("-i")
            .path_arg(input)
            .arg("-codec")
            .arg("copy")
            .arg("-avoid_negative_ts")
            .arg("make_zero")
            .path_arg(output)
    }

    /// Stream-copy the files listed in a concat manifest into `output`
    pub fn concat(manifest: &Path, output: &Path) -> Invocation {
        Self::base()
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .path_arg(manifest)
            .arg("-codec")
            .arg("copy")
            .path_arg(output)
    }

    /// Mono 16 kHz MP3, the input format speech-to-text services expect
    pub fn extract_audio(input: &Path, output: &Path) -> Invocation {
        Self::base()
            .arg("-i")
            .path_arg(input)
            .arg("-vn")
            .arg("-acodec")
            .arg("libmp3lame")
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg("16000")
            .path_arg(output)
    }

    /// Re-encode `input` with `subtitles` rendered into the picture
    pub fn burn_subtitles(input: &Path, subtitles: &Path, output: &Path) -> Invocation {
        Self::base()
            .arg("-i")
            .path_arg(input)
            .arg("-vf")
            .arg(format!("subtitles={}", PathUtils::escape_filter_value(subtitles)))
            .path_arg(output)
    }

    /// Grab one frame at `at` seconds
    pub fn thumbnail(input: &Path, at: f64, output: &Path) -> Invocation {
        Self::base()
            .arg("-ss")
            .arg(Self::seconds(at))
            .arg("-i")
            .path_arg(input)
            .arg("-vframes")
            .arg("1")
            .path_arg(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_arguments() {
        let range = TimeRange::new(1.5, 10.0).unwrap();
        let inv = FfmpegCommands::extract(Path::new("/in.mp4"), &range, Path::new("/out.mp4"));
        assert_eq!(inv.tool, Tool::Ffmpeg);
        assert_eq!(
            inv.args,
            vec![
                "-hide_banner", "-y", "-ss", "1.500", "-to", "10.000", "-i", "/in.mp4",
                "-codec", "copy", "-avoid_negative_ts", "make_zero", "/out.mp4",
            ]
        );
    }

    #[test]
    fn test_close_bounds_stay_distinct() {
        let range = TimeRange::new(1.0004, 1.0016).unwrap();
        let inv = FfmpegCommands::extract(Path::new("/in.mp4"), &range, Path::new("/out.mp4"));
        assert_eq!(inv.value_of("-ss"), Some("1.000"));
        assert_eq!(inv.value_of("-to"), Some("1.002"));

        let late = FfmpegCommands::thumbnail(Path::new("/in.mp4"), 3725.9996, Path::new("/t.jpg"));
        assert_eq!(late.value_of("-ss"), Some("3726.000"));
    }

    #[test]
    fn test_concat_arguments() {
        let inv = FfmpegCommands::concat(Path::new("/up/concat.txt"), Path::new("/up/out.mp4"));
        assert_eq!(
            inv.args,
            vec![
                "-hide_banner", "-y", "-f", "concat", "-safe", "0", "-i", "/up/concat.txt",
                "-codec", "copy", "/up/out.mp4",
            ]
        );
    }

    #[test]
    fn test_audio_burn_and_thumbnail_arguments() {
        let audio = FfmpegCommands::extract_audio(Path::new("/in.mp4"), Path::new("/a.mp3"));
        assert_eq!(
            audio.args,
            vec![
                "-hide_banner", "-y", "-i", "/in.mp4", "-vn", "-acodec", "libmp3lame", "-ac",
                "1", "-ar", "16000", "/a.mp3",
            ]
        );

        let burn = FfmpegCommands::burn_subtitles(
            Path::new("/in.mp4"),
            Path::new("/up/c:1.srt"),
            Path::new("/out.mp4"),
        );
        assert_eq!(burn.value_of("-vf"), Some(r"subtitles=/up/c\\:1.srt"));
        assert_eq!(burn.output_arg(), Some("/out.mp4"));

        let thumb = FfmpegCommands::thumbnail(Path::new("/in.mp4"), 5.0, Path::new("/t.jpg"));
        assert_eq!(
            thumb.args,
            vec!["-hide_banner", "-y", "-ss", "5.000", "-i", "/in.mp4", "-vframes", "1", "/t.jpg"]
        );
    }
}
