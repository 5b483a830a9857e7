// Clip interactor - Orchestrates trim and multi-segment cut use cases

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::ensure_input_file;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::SegmentCutter;
use crate::probe::MediaInspector;

/// Ranges to cut out of one input, joined in the order given
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub input: PathBuf,
    pub ranges: Vec<TimeRange>,
    pub output_name: String,
}

impl ClipRequest {
    /// Single-range request
    pub fn trim(input: impl Into<PathBuf>, range: TimeRange, output_name: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ranges: vec![range],
            output_name: output_name.into(),
        }
    }
}

/// Interactor for video clipping use case
pub struct ClipInteractor {
    cutter: Arc<SegmentCutter>,
    inspector: Arc<MediaInspector>,
    validate_ranges: bool,
}

impl ClipInteractor {
    /// Create new clip interactor. With `validate_ranges` the source is
    /// probed first and ranges past its end or overlapping each other are
    /// rejected.
    pub fn new(cutter: Arc<SegmentCutter>, inspector: Arc<MediaInspector>, validate_ranges: bool) -> Self {
        Self {
            cutter,
            inspector,
            validate_ranges,
        }
    }

    /// Execute video clipping
    pub async fn execute(
        &self,
        request: ClipRequest,
        cancel: &CancellationToken,
    ) -> Result<OperationReport, DomainError> {
        let started_at = Utc::now();
        ensure_input_file(&request.input)?;
        CutPlanRules::validate_shape(&request.ranges)?;

        if self.validate_ranges {
            let media_info = self.inspector.probe(&request.input, cancel).await?;
            CutPlanRules::validate_against_media(&request.ranges, &media_info)?;
        }

        let operation = if request.ranges.len() == 1 { "trim" } else { "cut" };
        info!(
            input = %request.input.display(),
            segments = request.ranges.len(),
            total_seconds = CutPlanRules::total_duration(&request.ranges),
            "starting {}",
            operation
        );

        let output = self
            .cutter
            .cut_segments(&request.input, &request.ranges, &request.output_name, cancel)
            .await?;

        Ok(OperationReport::finish(
            operation,
            vec![output.display().to_string()],
            started_at,
        ))
    }
}
