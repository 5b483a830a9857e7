//! CLI module for Clipix
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::ConfigOverrides;
use crate::domain::errors::DomainError;
use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

pub use args::*;

/// Clipix video editing backend
///
/// Trims and joins video segments with ffmpeg stream copy, extracts audio,
/// generates captions through a speech-to-text API and renders SRT/WebVTT.
#[derive(Parser, Debug)]
#[command(name = "clipix")]
#[command(about = "Clipix - segment cutting and captioning on top of ffmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./clipix.toml when present)
    #[arg(long, global = true, env = "CLIPIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory outputs and temporary files are written to
    #[arg(long, global = true)]
    pub upload_dir: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Timeout in seconds for each ffmpeg/ffprobe run
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values given as flags
    pub fn config_overrides(&self) -> Result<ConfigOverrides, DomainError> {
        Ok(ConfigOverrides {
            config_path: self.config.clone(),
            upload_dir: self.upload_dir.clone(),
            log_level: self.log_level.as_deref().map(LogLevel::parse).transpose()?,
            log_format: self.log_format.as_deref().map(LogFormat::parse).transpose()?,
            timeout_secs: self.timeout,
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show duration, resolution, codecs and size of a video
    Probe(ProbeArgs),
    /// Copy one time range into a new file
    Trim(TrimArgs),
    /// Copy several time ranges and join them in the order given
    Cut(CutArgs),
    /// Extract a mono 16 kHz MP3 track
    ExtractAudio(ExtractAudioArgs),
    /// Re-encode a video with a subtitle file burned in
    BurnSubtitles(BurnSubtitlesArgs),
    /// Save a single frame as an image
    Thumbnail(ThumbnailArgs),
    /// Transcribe a video and write SRT and WebVTT captions
    Transcribe(TranscribeArgs),
    /// Render a saved transcript as SRT or WebVTT
    Render(RenderArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cut_with_global_flags() {
        let cli = Cli::try_parse_from([
            "clipix", "cut", "--input", "in.mp4", "--segment", "0-5", "--segment",
            "1:00-1:30.5", "--output", "joined.mp4", "--json", "--timeout", "30",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.timeout, Some(30));
        match cli.command {
            Commands::Cut(args) => {
                assert_eq!(args.segments.len(), 2);
                assert_eq!(args.segments[1].start, 60.0);
                assert_eq!(args.segments[1].end, 90.5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_range_is_rejected_by_parser() {
        assert!(Cli::try_parse_from([
            "clipix", "cut", "--input", "in.mp4", "--segment", "5-2", "--output", "o.mp4",
        ])
        .is_err());
    }

    #[test]
    fn test_config_overrides_validate_levels() {
        let cli = Cli::try_parse_from([
            "clipix", "--log-level", "loud", "probe", "--input", "in.mp4",
        ])
        .unwrap();
        assert!(cli.config_overrides().is_err());
    }
}
