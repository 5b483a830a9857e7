//! Media inspection through ffprobe

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::domain::errors::DomainError;
use crate::domain::model::MediaInfo;
use crate::ports::{Invocation, ProcessPort, Tool};
use crate::probe::parse_probe_output;

/// Media inspector backed by one ffprobe invocation per file
pub struct MediaInspector {
    runner: Arc<dyn ProcessPort>,
}

impl MediaInspector {
    /// Create a new media inspector
    pub fn new(runner: Arc<dyn ProcessPort>) -> Self {
        Self { runner }
    }

    /// The ffprobe invocation used for `path`
    pub fn probe_invocation(path: &Path) -> Invocation {
        Invocation::new(Tool::Ffprobe)
            .arg("-v")
            .arg("error")
            .arg("-show_format")
            .arg("-show_streams")
            .arg("-of")
            .arg("json")
            .path_arg(path)
    }

    /// Probe a media file
    #[instrument(skip(self, path, cancel), fields(path = %path.display()))]
    pub async fn probe(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<MediaInfo, DomainError> {
        if !path.is_file() {
            return Err(DomainError::ProbeFail(format!(
                "Input file not found: {}",
                path.display()
            )));
        }

        let invocation = Self::probe_invocation(path);
        debug!(args = ?invocation.args, "running ffprobe");

        let output = self.runner.run(&invocation, cancel).await?;
        if !output.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe exited with status {:?}: {}",
                output.status,
                output.stderr.trim()
            )));
        }

        let info = parse_probe_output(&output.stdout)?;
        info!(
            duration = info.duration,
            width = info.width,
            height = info.height,
            has_audio = info.has_audio,
            "media inspected"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_invocation_shape() {
        let invocation = MediaInspector::probe_invocation(Path::new("/up/in.mp4"));
        assert_eq!(invocation.tool, Tool::Ffprobe);
        assert_eq!(
            invocation.args,
            vec!["-v", "error", "-show_format", "-show_streams", "-of", "json", "/up/in.mp4"]
        );
    }
}
