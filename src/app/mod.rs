// Application layer - Use case interactors

use std::path::Path;

use crate::domain::errors::DomainError;

pub mod caption_interactor;
pub mod clip_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod transcode_interactor;

// Re-export interactors
pub use caption_interactor::{CaptionInteractor, CaptionRequest, CaptionResponse};
pub use clip_interactor::{ClipInteractor, ClipRequest};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::InspectInteractor;
pub use transcode_interactor::TranscodeInteractor;

/// Inputs must be existing regular files
pub(crate) fn ensure_input_file(path: &Path) -> Result<(), DomainError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DomainError::BadArgs(format!(
            "Input file does not exist: {}",
            path.display()
        )))
    }
}
