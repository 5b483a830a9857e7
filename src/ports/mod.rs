// Ports - Interface definitions (contracts)

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::*;
use crate::domain::model::*;

/// External tools the backend shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Ffmpeg,
    Ffprobe,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Ffmpeg => "ffmpeg",
            Tool::Ffprobe => "ffprobe",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One external-process invocation: which tool and its argument vector
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// The final argument; ffmpeg invocations built by the engine always end
    /// with their output path.
    pub fn output_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Value following `flag`, e.g. the input after `-i`
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into a `ProcessFail` carrying the diagnostics
    pub fn ensure_success(self, tool: Tool) -> Result<Self, DomainError> {
        if self.success() {
            Ok(self)
        } else {
            Err(DomainError::ProcessFail {
                tool: tool.name().to_string(),
                status: self.status,
                stderr: self.stderr,
            })
        }
    }
}

/// Port for launching external processes.
///
/// Implementations wait for the process to exit and return its captured
/// output without interpreting the exit status. Cancelling `cancel` must
/// terminate the process and yield [`DomainError::Cancelled`].
#[async_trait]
pub trait ProcessPort: Send + Sync {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<ProcessOutput, DomainError>;
}

/// Port for speech-to-text services
#[async_trait]
pub trait TranscribePort: Send + Sync {
    /// Transcribe an audio file, optionally hinting the spoken language
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, DomainError>;
}
