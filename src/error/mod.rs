//! Error handling module for Clipix

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Clipix operations outside the domain layer
#[derive(Error, Debug)]
pub enum ClipixError {
    /// Domain operation failure (probe, process, filesystem, transcription)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file is not valid TOML for the expected schema
    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Clipix operations
pub type ClipixResult<T> = std::result::Result<T, ClipixError>;
