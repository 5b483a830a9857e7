//! Scripted process adapter
//!
//! Stands in for ffmpeg/ffprobe in tests and dry runs. Every invocation is
//! recorded. ffmpeg invocations write a small deterministic file to their
//! output path: extractions describe the range they copied, concatenations
//! join the files listed in their manifest, everything else records its
//! arguments. ffprobe invocations answer with a canned JSON document.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::*;
use crate::ports::*;

/// Scripted stand-in for the external tools
#[derive(Default)]
pub struct ScriptedProcessAdapter {
    invocations: Mutex<Vec<Invocation>>,
    probe_json: Option<String>,
    failure: Option<(usize, String)>,
    hang: bool,
}

impl ScriptedProcessAdapter {
    /// Create new scripted adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned for ffprobe invocations
    pub fn with_probe_json(mut self, json: impl Into<String>) -> Self {
        self.probe_json = Some(json.into());
        self
    }

    /// Make the invocation at `call_index` (0-based, across all tools) exit
    /// with status 1 and the given diagnostics
    pub fn failing_at(mut self, call_index: usize, stderr: impl Into<String>) -> Self {
        self.failure = Some((call_index, stderr.into()));
        self
    }

    /// Block every invocation until it is cancelled
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Snapshot of all invocations so far, in call order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().clone()
    }

    /// Invocations that were stream-copy extractions
    pub fn extractions(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.tool == Tool::Ffmpeg && inv.value_of("-ss").is_some() && inv.value_of("-to").is_some())
            .collect()
    }

    /// Invocations that were concat-demuxer runs
    pub fn concatenations(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.tool == Tool::Ffmpeg && inv.value_of("-f") == Some("concat"))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Invocation>> {
        // A poisoned lock only means another test thread panicked mid-push
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_ffmpeg(invocation: &Invocation) -> Result<ProcessOutput, DomainError> {
        let output = match invocation.output_arg() {
            Some(output) => output.to_string(),
            None => {
                return Ok(ProcessOutput {
                    status: Some(1),
                    stdout: Vec::new(),
                    stderr: "At least one output file must be specified".to_string(),
                })
            }
        };

        let content = if invocation.value_of("-f") == Some("concat") {
            let manifest = invocation.value_of("-i").unwrap_or_default();
            let listing = tokio::fs::read_to_string(manifest)
                .await
                .map_err(|e| DomainError::fs("reading concat manifest", e))?;
            let mut joined = Vec::new();
            for entry in listing.lines().filter_map(parse_manifest_line) {
                let bytes = tokio::fs::read(&entry)
                    .await
                    .map_err(|e| DomainError::fs("reading concat input", e))?;
                joined.extend_from_slice(&bytes);
            }
            joined
        } else if let (Some(start), Some(end)) = (invocation.value_of("-ss"), invocation.value_of("-to")) {
            let input = invocation.value_of("-i").unwrap_or_default();
            format!("{}:{}-{}\n", input, start, end).into_bytes()
        } else {
            let args = &invocation.args[..invocation.args.len() - 1];
            format!("{}\n", args.join(" ")).into_bytes()
        };

        tokio::fs::write(Path::new(&output), content)
            .await
            .map_err(|e| DomainError::fs("writing simulated output", e))?;

        Ok(ProcessOutput {
            status: Some(0),
            ..ProcessOutput::default()
        })
    }
}

/// Undo the concat demuxer quoting of one `file '...'` line
fn parse_manifest_line(line: &str) -> Option<String> {
    let quoted = line.trim().strip_prefix("file ")?;
    let inner = quoted.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("'\\''", "'"))
}

#[async_trait]
impl ProcessPort for ScriptedProcessAdapter {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancellationToken,
    ) -> Result<ProcessOutput, DomainError> {
        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        let call_index = {
            let mut invocations = self.lock();
            invocations.push(invocation.clone());
            invocations.len() - 1
        };

        if self.hang {
            cancel.cancelled().await;
            return Err(DomainError::Cancelled);
        }

        if let Some((index, stderr)) = &self.failure {
            if *index == call_index {
                return Ok(ProcessOutput {
                    status: Some(1),
                    stdout: Vec::new(),
                    stderr: stderr.clone(),
                });
            }
        }

        match invocation.tool {
            Tool::Ffmpeg => Self::simulate_ffmpeg(invocation).await,
            Tool::Ffprobe => match &self.probe_json {
                Some(json) => Ok(ProcessOutput {
                    status: Some(0),
                    stdout: json.clone().into_bytes(),
                    stderr: String::new(),
                }),
                None => Ok(ProcessOutput {
                    status: Some(1),
                    stdout: Vec::new(),
                    stderr: "Invalid data found when processing input".to_string(),
                }),
            },
        }
    }
}
