// Transcode interactor - Audio extraction, subtitle burn-in and thumbnails

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::app::ensure_input_file;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::Transcoder;

/// Interactor for the single-call re-encoding operations
pub struct TranscodeInteractor {
    transcoder: Arc<Transcoder>,
}

impl TranscodeInteractor {
    pub fn new(transcoder: Arc<Transcoder>) -> Self {
        Self { transcoder }
    }

    pub async fn extract_audio(
        &self,
        input: &Path,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationReport, DomainError> {
        let started_at = Utc::now();
        ensure_input_file(input)?;
        let output = self.transcoder.extract_audio(input, output_name, cancel).await?;
        Ok(OperationReport::finish(
            "extract-audio",
            vec![output.display().to_string()],
            started_at,
        ))
    }

    pub async fn burn_subtitles(
        &self,
        input: &Path,
        subtitles: &Path,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationReport, DomainError> {
        let started_at = Utc::now();
        ensure_input_file(input)?;
        let output = self
            .transcoder
            .burn_subtitles(input, subtitles, output_name, cancel)
            .await?;
        Ok(OperationReport::finish(
            "burn-subtitles",
            vec![output.display().to_string()],
            started_at,
        ))
    }

    pub async fn thumbnail(
        &self,
        input: &Path,
        at: TimeSpec,
        output_name: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationReport, DomainError> {
        let started_at = Utc::now();
        ensure_input_file(input)?;
        let output = self
            .transcoder
            .thumbnail(input, at.as_seconds(), output_name, cancel)
            .await?;
        Ok(OperationReport::finish(
            "thumbnail",
            vec![output.display().to_string()],
            started_at,
        ))
    }
}
