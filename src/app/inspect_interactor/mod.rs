// Inspect interactor - Orchestrates media file inspection use case

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::app::ensure_input_file;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::probe::MediaInspector;

/// Interactor for media file inspection use case
pub struct InspectInteractor {
    inspector: Arc<MediaInspector>,
}

impl InspectInteractor {
    pub fn new(inspector: Arc<MediaInspector>) -> Self {
        Self { inspector }
    }

    /// Execute media file inspection
    pub async fn execute(
        &self,
        input: &Path,
        cancel: &CancellationToken,
    ) -> Result<MediaInfo, DomainError> {
        ensure_input_file(input)?;
        self.inspector.probe(input, cancel).await
    }
}
