// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Metadata extraction failed or a required stream is missing
    ProbeFail(String),
    /// External process exited unsuccessfully
    ProcessFail {
        /// Tool that was invoked (ffmpeg, ffprobe)
        tool: String,
        /// Exit code, `None` when the process was killed by a signal
        status: Option<i32>,
        /// Captured diagnostic output
        stderr: String,
    },
    /// Filesystem read/write failure
    FsFail(String),
    /// Transcription adapter failure
    AdapterFail(String),
    /// Operation cancelled through its cancellation token
    Cancelled,
    /// External process exceeded the configured timeout
    TimedOut {
        tool: String,
        seconds: u64,
    },
}

impl DomainError {
    /// Wrap an I/O error with a short description of what was being done
    pub fn fs(context: &str, err: std::io::Error) -> Self {
        DomainError::FsFail(format!("{}: {}", context, err))
    }

    /// Diagnostic text carried by the error, if any
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            DomainError::ProcessFail { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::ProcessFail {
                tool,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "{} exited with status {}", tool, code)?,
                    None => write!(f, "{} terminated by signal", tool)?,
                }
                let trimmed = stderr.trim();
                if !trimmed.is_empty() {
                    write!(f, ": {}", trimmed)?;
                }
                Ok(())
            }
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
            DomainError::AdapterFail(msg) => write!(f, "Transcription failed: {}", msg),
            DomainError::Cancelled => write!(f, "Operation cancelled"),
            DomainError::TimedOut { tool, seconds } => {
                write!(f, "{} did not finish within {}s", tool, seconds)
            }
        }
    }
}

impl std::error::Error for DomainError {}
