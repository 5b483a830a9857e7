// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!("Time must be finite: {}", trimmed)));
            }
            if seconds < 0.0 {
                return Err(DomainError::BadArgs("Time cannot be negative".to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        // Try parsing as HH:MM:SS.ms or MM:SS.ms
        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = minutes
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid minutes format".to_string()))?;
                let seconds_part = parse_seconds_field(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds_part))
            }
            [hours, minutes, seconds] => {
                let hours = hours
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid hours format".to_string()))?;
                let minutes = minutes
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs("Invalid minutes format".to_string()))?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                let seconds_part = parse_seconds_field(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                trimmed
            ))),
        }
    }
}

fn parse_seconds_field(field: &str) -> Result<f64, DomainError> {
    let seconds = field
        .parse::<f64>()
        .map_err(|_| DomainError::BadArgs("Invalid seconds format".to_string()))?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(
            "Seconds must be less than 60".to_string(),
        ));
    }
    Ok(seconds)
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.seconds)
    }
}

/// Round seconds to whole milliseconds, the precision ffmpeg arguments carry.
/// Negative input saturates to zero.
pub fn whole_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

/// Half-open span of the source timeline, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Create a new range, enforcing `0 <= start < end` at millisecond
    /// resolution
    pub fn new(start: f64, end: f64) -> Result<Self, DomainError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Check the range invariant. Ranges built through serde skip `new`, so
    /// callers holding deserialized ranges go through here.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(DomainError::BadArgs(format!(
                "Time range bounds must be finite: {}",
                self
            )));
        }
        if self.start < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Time range cannot start before zero: {}",
                self
            )));
        }
        if self.start >= self.end {
            return Err(DomainError::BadArgs(format!(
                "Start ({}) must be less than end ({})",
                self.start, self.end
            )));
        }
        if whole_millis(self.end) <= whole_millis(self.start) {
            return Err(DomainError::BadArgs(format!(
                "Time range must span at least one millisecond: {}",
                self
            )));
        }
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True when the two ranges share any part of the timeline
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = DomainError;

    /// Parse `START-END`, each side in any format accepted by [`TimeSpec::parse`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| {
            DomainError::BadArgs(format!("Expected START-END segment, got '{}'", s))
        })?;
        let start = TimeSpec::parse(start)?;
        let end = TimeSpec::parse(end)?;
        TimeRange::new(start.as_seconds(), end.as_seconds())
    }
}

/// Rational frame rate as reported by ffprobe (`r_frame_rate`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    /// Create a new frame rate
    pub fn new(num: u32, den: u32) -> Result<Self, DomainError> {
        if den == 0 {
            return Err(DomainError::ProbeFail(
                "Frame rate denominator cannot be zero".to_string(),
            ));
        }
        Ok(Self { num, den })
    }

    /// Frames per second
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl FromStr for FrameRate {
    type Err = DomainError;

    /// Parse `num/den` or a bare integer rate
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::ProbeFail(format!("Invalid frame rate '{}'", s));
        let (num, den) = match s.trim().split_once('/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (s.trim(), "1"),
        };
        let num = num.parse::<u32>().map_err(|_| invalid())?;
        let den = den.parse::<u32>().map_err(|_| invalid())?;
        FrameRate::new(num, den)
    }
}

/// Snapshot of a media file's container and primary streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Video codec name
    pub codec: String,
    pub has_audio: bool,
    pub audio_codec: Option<String>,
    /// File size in bytes
    pub file_size: u64,
    /// Container bit rate in bits per second
    pub bitrate: u64,
}

/// One timed piece of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl CaptionSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Full output of a transcription call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub segments: Vec<CaptionSegment>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Supported subtitle file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip (.srt), numbered cues, comma millisecond separator
    Srt,
    /// WebVTT (.vtt), header line, period millisecond separator
    WebVtt,
}

impl SubtitleFormat {
    /// Parse subtitle format from string
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.to_lowercase().as_str() {
            "srt" | "subrip" => Ok(SubtitleFormat::Srt),
            "vtt" | "webvtt" => Ok(SubtitleFormat::WebVtt),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid subtitle format: {}. Valid formats: srt, vtt",
                format_str
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::WebVtt => "vtt",
        }
    }
}

/// Summary of a completed operation, printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: String,
    pub outputs: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl OperationReport {
    /// Finish a report for an operation that began at `started_at`
    pub fn finish(operation: &str, outputs: Vec<String>, started_at: DateTime<Utc>) -> Self {
        let elapsed_ms = (Utc::now() - started_at).num_milliseconds().max(0) as u64;
        Self {
            operation: operation.to_string(),
            outputs,
            started_at,
            elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests;
