//! Clipix video editing backend library
//!
//! Stream-copy trimming and multi-segment cutting on top of ffmpeg, media
//! inspection through ffprobe, audio extraction for speech-to-text, and
//! SRT/WebVTT caption rendering.

pub mod adapters;
pub mod app;
pub mod captions;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod probe;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    CaptionSegment, MediaInfo, OperationReport, SubtitleFormat, TimeRange, TimeSpec,
    TranscriptionResult,
};
pub use error::{ClipixError, ClipixResult};
