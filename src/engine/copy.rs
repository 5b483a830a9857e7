//! Stream copy implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::errors::DomainError;
use crate::domain::model::TimeRange;
use crate::engine::{run_checked, FfmpegCommands, StagedOutput};
use crate::ports::ProcessPort;

/// Stream copy clipper for lossless range extraction
pub struct StreamCopyClipper {
    runner: Arc<dyn ProcessPort>,
}

impl StreamCopyClipper {
    /// Create a new stream copy clipper
    pub fn new(runner: Arc<dyn ProcessPort>) -> Self {
        Self { runner }
    }

    /// Copy `range` of `input` into `dest` without re-encoding
    pub async fn extract(
        &self,
        input: &Path,
        range: &TimeRange,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let invocation = FfmpegCommands::extract(input, range, dest);
        run_checked(self.runner.as_ref(), &invocation, cancel).await?;
        Ok(())
    }

    /// Extract into a final output. The copy is staged and only replaces
    /// `output` once ffmpeg succeeds.
    pub async fn trim(
        &self,
        input: &Path,
        range: &TimeRange,
        output: PathBuf,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        range.validate()?;
        let staged = StagedOutput::reserve(output)?;
        self.extract(input, range, staged.path(), cancel).await?;
        staged.commit()
    }
}
