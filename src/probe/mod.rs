//! Media file inspection module
//!
//! Decodes the JSON document printed by
//! `ffprobe -v error -show_format -show_streams -of json` into a [`MediaInfo`].

use serde::Deserialize;

use crate::domain::errors::DomainError;
use crate::domain::model::{FrameRate, MediaInfo};

pub mod inspector;

pub use inspector::MediaInspector;

/// Top-level ffprobe document
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

/// One entry of `streams`; ffprobe omits keys that do not apply
#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
}

/// The `format` section; numeric values are printed as strings
#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

/// Parse ffprobe JSON output into a media snapshot
pub fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, DomainError> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| DomainError::ProbeFail(format!("Unreadable ffprobe output: {}", e)))?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| DomainError::ProbeFail("No video stream found".to_string()))?;
    let audio = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    let format = probe
        .format
        .as_ref()
        .ok_or_else(|| DomainError::ProbeFail("Missing format section".to_string()))?;

    let duration: f64 = parse_field("format.duration", format.duration.as_deref())?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(DomainError::ProbeFail(format!(
            "Invalid format.duration: {}",
            duration
        )));
    }

    let fps = required("stream.r_frame_rate", video.r_frame_rate.as_deref())?
        .parse::<FrameRate>()?
        .as_f64();

    Ok(MediaInfo {
        duration,
        width: required("stream.width", video.width)?,
        height: required("stream.height", video.height)?,
        fps,
        codec: required("stream.codec_name", video.codec_name.clone())?,
        has_audio: audio.is_some(),
        audio_codec: audio.and_then(|a| a.codec_name.clone()),
        file_size: parse_field("format.size", format.size.as_deref())?,
        bitrate: parse_field("format.bit_rate", format.bit_rate.as_deref())?,
    })
}

fn required<T>(name: &str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::ProbeFail(format!("Missing {}", name)))
}

fn parse_field<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, DomainError> {
    let raw = required(name, value)?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| DomainError::ProbeFail(format!("Invalid {}: '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "streams": [
            {"index": 0, "codec_name": "h264", "codec_type": "video",
             "width": 1920, "height": 1080, "r_frame_rate": "30000/1001"},
            {"index": 1, "codec_name": "aac", "codec_type": "audio",
             "sample_rate": "48000", "channels": 2}
        ],
        "format": {"filename": "in.mp4", "duration": "62.500000",
                   "size": "1048576", "bit_rate": "134217"}
    }"#;

    #[test]
    fn test_parse_full_probe() {
        let info = parse_probe_output(FULL.as_bytes()).unwrap();
        assert_eq!(info.duration, 62.5);
        assert_eq!((info.width, info.height), (1920, 1080));
        assert!((info.fps - 29.97).abs() < 0.01);
        assert_eq!(info.codec, "h264");
        assert!(info.has_audio);
        assert_eq!(info.audio_codec.as_deref(), Some("aac"));
        assert_eq!(info.file_size, 1_048_576);
        assert_eq!(info.bitrate, 134_217);
    }

    #[test]
    fn test_parse_without_audio() {
        let json = r#"{
            "streams": [{"codec_name": "vp9", "codec_type": "video",
                         "width": 640, "height": 360, "r_frame_rate": "25/1"}],
            "format": {"duration": "10.0", "size": "2048", "bit_rate": "1638"}
        }"#;
        let info = parse_probe_output(json.as_bytes()).unwrap();
        assert!(!info.has_audio);
        assert_eq!(info.audio_codec, None);
        assert_eq!(info.fps, 25.0);
    }

    #[test]
    fn test_parse_without_video_fails() {
        let json = r#"{
            "streams": [{"codec_name": "mp3", "codec_type": "audio"}],
            "format": {"duration": "10.0", "size": "2048", "bit_rate": "1638"}
        }"#;
        let err = parse_probe_output(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DomainError::ProbeFail(_)));
    }

    #[test]
    fn test_missing_or_bad_fields_fail() {
        let no_bitrate = FULL.replace(r#", "bit_rate": "134217""#, "");
        assert!(matches!(
            parse_probe_output(no_bitrate.as_bytes()),
            Err(DomainError::ProbeFail(_))
        ));

        let zero_den = FULL.replace("30000/1001", "30/0");
        assert!(matches!(
            parse_probe_output(zero_den.as_bytes()),
            Err(DomainError::ProbeFail(_))
        ));

        let bad_duration = FULL.replace("62.500000", "N/A");
        assert!(matches!(
            parse_probe_output(bad_duration.as_bytes()),
            Err(DomainError::ProbeFail(_))
        ));

        assert!(parse_probe_output(b"not json").is_err());
    }
}
