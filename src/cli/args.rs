//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::{SubtitleFormat, TimeRange, TimeSpec};

fn parse_time(value: &str) -> Result<TimeSpec, String> {
    TimeSpec::parse(value).map_err(|e| e.to_string())
}

fn parse_range(value: &str) -> Result<TimeRange, String> {
    value.parse::<TimeRange>().map_err(|e| e.to_string())
}

fn parse_format(value: &str) -> Result<SubtitleFormat, String> {
    SubtitleFormat::parse(value).map_err(|e| e.to_string())
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, value_parser = parse_time)]
    pub start: TimeSpec,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, value_parser = parse_time)]
    pub end: TimeSpec,

    /// Output file name inside the upload directory
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Segment as START-END; repeat for each segment, in output order
    #[arg(long = "segment", required = true, value_parser = parse_range)]
    pub segments: Vec<TimeRange>,

    /// Output file name inside the upload directory
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the extract-audio command
#[derive(Args, Debug)]
pub struct ExtractAudioArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file name inside the upload directory
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the burn-subtitles command
#[derive(Args, Debug)]
pub struct BurnSubtitlesArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Subtitle file (SRT or WebVTT)
    #[arg(long)]
    pub subtitles: PathBuf,

    /// Output file name inside the upload directory
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the thumbnail command
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Frame time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(long, value_parser = parse_time)]
    pub at: TimeSpec,

    /// Output image name inside the upload directory
    #[arg(short, long)]
    pub output: String,
}

/// Arguments for the transcribe command
#[derive(Args, Debug)]
pub struct TranscribeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Spoken language hint (ISO-639-1, e.g. "en")
    #[arg(long)]
    pub language: Option<String>,

    /// SRT output name (default: <input stem>.srt)
    #[arg(long)]
    pub srt: Option<String>,

    /// WebVTT output name (default: <input stem>.vtt)
    #[arg(long)]
    pub vtt: Option<String>,

    /// Transcript JSON output name (default: <input stem>.json)
    #[arg(long)]
    pub transcript: Option<String>,

    /// Keep the extracted audio next to the captions
    #[arg(long)]
    pub keep_audio: bool,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Transcript JSON written by `transcribe`
    #[arg(long)]
    pub transcript: PathBuf,

    /// Subtitle format (srt or vtt)
    #[arg(long, value_parser = parse_format)]
    pub format: SubtitleFormat,

    /// Destination path; "-" writes to stdout
    #[arg(short, long)]
    pub output: PathBuf,
}
