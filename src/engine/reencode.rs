//! Single-call ffmpeg wrappers that re-encode: audio extraction, subtitle
//! burn-in and thumbnails

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::domain::errors::DomainError;
use crate::engine::{run_checked, FfmpegCommands, StagedOutput, Workspace};
use crate::ports::{Invocation, ProcessPort};

/// Runs the re-encoding ffmpeg operations inside a workspace
pub struct Transcoder {
    runner: Arc<dyn ProcessPort>,
    workspace: Workspace,
}

impl Transcoder {
    pub fn new(runner: Arc<dyn ProcessPort>, workspace: Workspace) -> Self {
        Self { runner, workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Run the invocation built for a staging path, then move the result
    /// onto `output`
    async fn run_staged(
        &self,
        output: PathBuf,
        cancel: &CancellationToken,
        build: impl FnOnce(&Path) -> Invocation,
    ) -> Result<PathBuf, DomainError> {
        let staged = StagedOutput::reserve(output)?;
        run_checked(self.runner.as_ref(), &build(staged.path()), cancel).await?;
        staged.commit()
    }

    /// Extract a mono 16 kHz MP3 track named `output_name`
    #[instrument(skip(self, input, cancel), fields(input = %input.display()))]
    pub async fn extract_audio(
        &self,
        input: &Path,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        let output = self.workspace.output_for(input, output_name)?;
        let output = self
            .run_staged(output, cancel, |dest| FfmpegCommands::extract_audio(input, dest))
            .await?;
        info!(output = %output.display(), "audio extracted");
        Ok(output)
    }

    /// Extract audio straight into a destination the caller owns, e.g. a
    /// temporary file
    pub async fn extract_audio_to(
        &self,
        input: &Path,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        run_checked(self.runner.as_ref(), &FfmpegCommands::extract_audio(input, dest), cancel)
            .await?;
        info!(output = %dest.display(), "audio extracted");
        Ok(())
    }

    /// Re-encode `input` with the subtitle file rendered into the picture
    #[instrument(skip(self, input, subtitles, cancel), fields(input = %input.display(), subtitles = %subtitles.display()))]
    pub async fn burn_subtitles(
        &self,
        input: &Path,
        subtitles: &Path,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        if !subtitles.is_file() {
            return Err(DomainError::BadArgs(format!(
                "Subtitle file not found: {}",
                subtitles.display()
            )));
        }
        let output = self.workspace.output_for(input, output_name)?;
        let output = self
            .run_staged(output, cancel, |dest| {
                FfmpegCommands::burn_subtitles(input, subtitles, dest)
            })
            .await?;
        info!(output = %output.display(), "subtitles burned");
        Ok(output)
    }

    /// Save the frame at `at` seconds as an image
    #[instrument(skip(self, input, cancel), fields(input = %input.display()))]
    pub async fn thumbnail(
        &self,
        input: &Path,
        at: f64,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DomainError> {
        if !at.is_finite() || at < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Thumbnail time must be a non-negative number of seconds, got {}",
                at
            )));
        }
        let output = self.workspace.output_for(input, output_name)?;
        let output = self
            .run_staged(output, cancel, |dest| FfmpegCommands::thumbnail(input, at, dest))
            .await?;
        info!(output = %output.display(), at, "thumbnail saved");
        Ok(output)
    }
}
