//! Segment cutting: per-range extraction followed by one concat

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::domain::errors::DomainError;
use crate::domain::model::TimeRange;
use crate::domain::rules::CutPlanRules;
use crate::engine::{
    run_checked, FfmpegCommands, StagedOutput, StreamCopyClipper, TempArtifacts, Workspace,
};
use crate::ports::ProcessPort;
use crate::utils::path::PathUtils;

/// Cuts ranges out of a source and joins them into one output
pub struct SegmentCutter {
    runner: Arc<dyn ProcessPort>,
    workspace: Workspace,
    copy_clipper: StreamCopyClipper,
}

impl SegmentCutter {
    /// Create a new segment cutter writing into `workspace`
    pub fn new(runner: Arc<dyn ProcessPort>, workspace: Workspace) -> Self {
        Self {
            copy_clipper: StreamCopyClipper::new(runner.clone()),
            runner,
            workspace,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Copy one range of `input` straight into the output
    #[instrument(skip(self, input, cancel), fields(input = %input.display()))]
    pub async fn trim_video(
        &self,
        input: &Path,
        range: TimeRange,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        let output = self.workspace.output_for(input, output_name)?;
        let started = Instant::now();

        let output = self.copy_clipper.trim(input, &range, output, cancel).await?;

        info!(
            output = %output.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "video trimmed"
        );
        Ok(output)
    }

    /// Extract every range in order and join them into `output_name`.
    ///
    /// A single range takes the trim path. Temporary segments and the
    /// manifest are removed whether the cut succeeds, fails or is dropped.
    /// The joined file replaces `output_name` only after the concat succeeds.
    #[instrument(skip(self, input, ranges, cancel), fields(input = %input.display(), segments = ranges.len()))]
    pub async fn cut_segments(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        CutPlanRules::validate_shape(ranges)?;
        if let [range] = ranges {
            return self.trim_video(input, *range, output_name, cancel).await;
        }

        let staged = StagedOutput::reserve(self.workspace.output_for(input, output_name)?)?;
        let started = Instant::now();
        let mut artifacts = TempArtifacts::new(self.workspace.dir());

        let result = self
            .extract_and_join(input, ranges, staged.path(), &mut artifacts, cancel)
            .await;
        artifacts.release();
        result?;
        let output = staged.commit()?;

        info!(
            output = %output.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "segments cut and joined"
        );
        Ok(output)
    }

    async fn extract_and_join(
        &self,
        input: &Path,
        ranges: &[TimeRange],
        output: &Path,
        artifacts: &mut TempArtifacts,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let extension = PathUtils::extension_or(input, "mp4");

        for (index, range) in ranges.iter().enumerate() {
            let segment = artifacts.reserve_segment(index, &extension)?;
            self.copy_clipper.extract(input, range, &segment, cancel).await?;
        }

        let manifest = artifacts.write_manifest()?;
        let invocation = FfmpegCommands::concat(&manifest, output);
        run_checked(self.runner.as_ref(), &invocation, cancel).await?;
        Ok(())
    }
}
