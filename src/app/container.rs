use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::adapters::{AppConfig, OpenAiTranscribeAdapter, TokioProcessAdapter};
use crate::app::{
    caption_interactor::CaptionInteractor, clip_interactor::ClipInteractor,
    inspect_interactor::InspectInteractor, transcode_interactor::TranscodeInteractor,
};
use crate::domain::errors::DomainError;
use crate::engine::{SegmentCutter, Transcoder, Workspace};
use crate::ports::{ProcessPort, TranscribePort};
use crate::probe::MediaInspector;

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn transcode_interactor(&self) -> Arc<TranscodeInteractor>;
    fn caption_interactor(&self) -> Arc<CaptionInteractor>;
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    transcode_interactor: Arc<TranscodeInteractor>,
    caption_interactor: Arc<CaptionInteractor>,
}

impl DefaultAppContainer {
    /// Wire the real ffmpeg/ffprobe runner and, when an API key is
    /// configured, the transcription client
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let mut runner = TokioProcessAdapter::new(&config.tools.ffmpeg, &config.tools.ffprobe);
        if let Some(secs) = config.tools.process_timeout_secs {
            runner = runner.with_timeout(Duration::from_secs(secs));
        }

        let transcriber = match config.transcription.api_key {
            Some(_) => Some(Arc::new(OpenAiTranscribeAdapter::new(&config.transcription)?)
                as Arc<dyn TranscribePort>),
            None => {
                debug!("no transcription API key configured");
                None
            }
        };

        Self::with_ports(config, Arc::new(runner), transcriber)
    }

    /// Wire interactors around caller-supplied ports
    pub fn with_ports(
        config: &AppConfig,
        runner: Arc<dyn ProcessPort>,
        transcriber: Option<Arc<dyn TranscribePort>>,
    ) -> Result<Self, DomainError> {
        let workspace = Workspace::new(&config.storage.upload_dir)?;

        let inspector = Arc::new(MediaInspector::new(Arc::clone(&runner)));
        let cutter = Arc::new(SegmentCutter::new(Arc::clone(&runner), workspace.clone()));
        let transcoder = Arc::new(Transcoder::new(Arc::clone(&runner), workspace));

        Ok(Self {
            clip_interactor: Arc::new(ClipInteractor::new(
                cutter,
                Arc::clone(&inspector),
                config.cut.validate_ranges,
            )),
            inspect_interactor: Arc::new(InspectInteractor::new(inspector)),
            transcode_interactor: Arc::new(TranscodeInteractor::new(Arc::clone(&transcoder))),
            caption_interactor: Arc::new(CaptionInteractor::new(transcoder, transcriber)),
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn transcode_interactor(&self) -> Arc<TranscodeInteractor> {
        Arc::clone(&self.transcode_interactor)
    }

    fn caption_interactor(&self) -> Arc<CaptionInteractor> {
        Arc::clone(&self.caption_interactor)
    }
}
