//! Child-process execution adapter
//!
//! Launches ffmpeg/ffprobe with tokio, captures their output and enforces
//! cancellation and the configured timeout.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::ports::*;

/// Process adapter backed by `tokio::process`
pub struct TokioProcessAdapter {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    timeout: Option<Duration>,
}

impl TokioProcessAdapter {
    /// Create new process adapter
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            timeout: None,
        }
    }

    /// Kill any process that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn program(&self, tool: Tool) -> &PathBuf {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Ffprobe => &self.ffprobe,
        }
    }
}

#[async_trait]
impl ProcessPort for TokioProcessAdapter {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<ProcessOutput, DomainError> {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        let program = self.program(invocation.tool);
        debug!(command = %invocation, program = %program.display(), "spawning external process");

        // kill_on_drop: dropping the wait future on cancel/timeout kills the child
        let child = Command::new(program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DomainError::ProcessFail {
                tool: invocation.tool.name().to_string(),
                status: None,
                stderr: format!("failed to spawn {}: {}", program.display(), e),
            })?;

        let wait = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                    Ok(result) => result.map_err(|e| DomainError::fs("waiting for process", e)),
                    Err(_) => Err(DomainError::TimedOut {
                        tool: invocation.tool.name().to_string(),
                        seconds: limit.as_secs(),
                    }),
                },
                None => child
                    .wait_with_output()
                    .await
                    .map_err(|e| DomainError::fs("waiting for process", e)),
            }
        };

        let output = tokio::select! {
            _ = cancel.cancelled() => {
                warn!(tool = %invocation.tool, "cancellation requested, killing process");
                return Err(DomainError::Cancelled);
            }
            result = wait => result?,
        };

        let output = ProcessOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(tool = %invocation.tool, status = ?output.status, "process finished");
        Ok(output)
    }
}
