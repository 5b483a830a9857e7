// Caption interactor - Audio extraction, transcription and subtitle files

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tempfile::Builder;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::ensure_input_file;
use crate::captions::write_subtitle_file;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::Transcoder;
use crate::ports::TranscribePort;
use crate::utils::path::PathUtils;

/// Caption generation request; unset names derive from the input stem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionRequest {
    pub input: PathBuf,
    pub language: Option<String>,
    pub srt_name: Option<String>,
    pub vtt_name: Option<String>,
    pub transcript_name: Option<String>,
    /// Keep the extracted audio as `{stem}_audio.mp3`
    pub keep_audio: bool,
}

/// Transcription plus the files written from it
#[derive(Debug, Clone, Serialize)]
pub struct CaptionResponse {
    pub transcription: TranscriptionResult,
    pub report: OperationReport,
}

struct OutputNames {
    audio: String,
    srt: String,
    vtt: String,
    transcript: String,
}

/// Interactor for the caption generation pipeline
pub struct CaptionInteractor {
    transcoder: Arc<Transcoder>,
    transcriber: Option<Arc<dyn TranscribePort>>,
}

impl CaptionInteractor {
    pub fn new(transcoder: Arc<Transcoder>, transcriber: Option<Arc<dyn TranscribePort>>) -> Self {
        Self {
            transcoder,
            transcriber,
        }
    }

    fn output_names(request: &CaptionRequest) -> OutputNames {
        let stem = PathUtils::stem_or(&request.input, "captions");
        OutputNames {
            audio: format!("{}_audio.mp3", stem),
            srt: request.srt_name.clone().unwrap_or_else(|| format!("{}.srt", stem)),
            vtt: request.vtt_name.clone().unwrap_or_else(|| format!("{}.vtt", stem)),
            transcript: request
                .transcript_name
                .clone()
                .unwrap_or_else(|| format!("{}.json", stem)),
        }
    }

    /// Extract audio, transcribe it and write SRT, WebVTT and the raw
    /// transcript into the workspace
    pub async fn execute(
        &self,
        request: CaptionRequest,
        cancel: &CancellationToken,
    ) -> Result<CaptionResponse, DomainError> {
        let started_at = Utc::now();
        let transcriber = self.transcriber.as_ref().ok_or_else(|| {
            DomainError::BadArgs(
                "Transcription is not configured (set CLIPIX_TRANSCRIPTION_API_KEY)".to_string(),
            )
        })?;
        ensure_input_file(&request.input)?;

        let workspace = self.transcoder.workspace();
        let names = Self::output_names(&request);
        let srt_path = workspace.output_for(&request.input, &names.srt)?;
        let vtt_path = workspace.output_for(&request.input, &names.vtt)?;
        let transcript_path = workspace.output_for(&request.input, &names.transcript)?;
        let mut outputs = Vec::new();

        let transcription = if request.keep_audio {
            let audio = self
                .transcoder
                .extract_audio(&request.input, &names.audio, cancel)
                .await?;
            outputs.push(audio.display().to_string());
            self.transcribe(&**transcriber, &audio, request.language.as_deref(), cancel)
                .await?
        } else {
            let audio = Builder::new()
                .prefix("audio_")
                .suffix(".mp3")
                .tempfile_in(workspace.dir())
                .map_err(|e| DomainError::fs("creating temporary audio file", e))?
                .into_temp_path();
            self.transcoder
                .extract_audio_to(&request.input, &audio, cancel)
                .await?;
            self.transcribe(&**transcriber, &audio, request.language.as_deref(), cancel)
                .await?
        };

        write_subtitle_file(&transcription.segments, SubtitleFormat::Srt, &srt_path).await?;
        write_subtitle_file(&transcription.segments, SubtitleFormat::WebVtt, &vtt_path).await?;
        let transcript = serde_json::to_vec_pretty(&transcription)
            .map_err(|e| DomainError::FsFail(format!("Failed to encode transcript: {}", e)))?;
        tokio::fs::write(&transcript_path, transcript)
            .await
            .map_err(|e| DomainError::fs("writing transcript", e))?;

        outputs.extend(
            [&srt_path, &vtt_path, &transcript_path]
                .iter()
                .map(|p| p.display().to_string()),
        );

        info!(
            segments = transcription.segments.len(),
            language = transcription.language.as_deref().unwrap_or("unknown"),
            "captions generated"
        );
        Ok(CaptionResponse {
            transcription,
            report: OperationReport::finish("transcribe", outputs, started_at),
        })
    }

    async fn transcribe(
        &self,
        transcriber: &dyn TranscribePort,
        audio: &Path,
        language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionResult, DomainError> {
        tokio::select! {
            result = transcriber.transcribe(audio, language) => result,
            _ = cancel.cancelled() => Err(DomainError::Cancelled),
        }
    }
}
