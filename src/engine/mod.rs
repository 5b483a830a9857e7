//! Core clipping engine module
//!
//! Builds ffmpeg invocations, runs them through a [`ProcessPort`] and owns
//! the temporary artifacts a multi-segment cut needs.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::domain::errors::DomainError;
use crate::ports::{Invocation, ProcessOutput, ProcessPort};
use crate::utils::path::PathUtils;

pub mod artifacts;
pub mod clipper;
pub mod commands;
pub mod copy;
pub mod reencode;

pub use artifacts::{StagedOutput, TempArtifacts};
pub use clipper::SegmentCutter;
pub use commands::FfmpegCommands;
pub use copy::StreamCopyClipper;
pub use reencode::Transcoder;

/// The upload directory all outputs and temporary files live in
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Open the directory, creating it when absent. The stored path is
    /// absolute so manifest entries never depend on the working directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| DomainError::fs(&format!("creating {}", dir.display()), e))?;
        let dir = dir
            .canonicalize()
            .map_err(|e| DomainError::fs(&format!("resolving {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve an output name inside the workspace
    pub fn output_path(&self, name: &str) -> Result<PathBuf, DomainError> {
        PathUtils::validate_output_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Resolve an output name for an operation reading `input`, refusing a
    /// name that points back at the input file
    pub fn output_for(&self, input: &Path, name: &str) -> Result<PathBuf, DomainError> {
        let output = self.output_path(name)?;
        if let (Ok(source), Ok(existing)) = (input.canonicalize(), output.canonicalize()) {
            if source == existing {
                return Err(DomainError::BadArgs(format!(
                    "Output {} would overwrite the input file",
                    output.display()
                )));
            }
        }
        Ok(output)
    }
}

/// Run one invocation and require a zero exit status
pub(crate) async fn run_checked(
    runner: &dyn ProcessPort,
    invocation: &Invocation,
    cancel: &CancellationToken,
) -> Result<ProcessOutput, DomainError> {
    if cancel.is_cancelled() {
        return Err(DomainError::Cancelled);
    }

    debug!(tool = %invocation.tool, args = ?invocation.args, "running external tool");
    let result = runner
        .run(invocation, cancel)
        .await
        .and_then(|output| output.ensure_success(invocation.tool));

    if let Err(e) = &result {
        error!(tool = %invocation.tool, "{}", e);
    }
    result
}
