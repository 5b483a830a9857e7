//! OpenAI-compatible transcription adapter
//!
//! Uploads an audio file to `{api_base}/audio/transcriptions` and asks for
//! `verbose_json`, which carries segment timestamps alongside the text.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::adapters::toml_config::TranscriptionConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Response body of a `verbose_json` transcription
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Vec<ApiSegment>,
}

#[derive(Debug, Deserialize)]
struct ApiSegment {
    start: f64,
    end: f64,
    text: String,
}

impl VerboseTranscription {
    fn into_result(self, requested_language: Option<&str>) -> TranscriptionResult {
        TranscriptionResult {
            text: self.text,
            language: self
                .language
                .or_else(|| requested_language.map(str::to_string)),
            segments: self
                .segments
                .into_iter()
                .map(|s| CaptionSegment::new(s.start, s.end, s.text.trim()))
                .collect(),
            duration: self.duration,
        }
    }
}

/// Transcription adapter for OpenAI-compatible speech-to-text APIs
pub struct OpenAiTranscribeAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiTranscribeAdapter {
    /// Create new adapter; fails when no API key is configured
    pub fn new(config: &TranscriptionConfig) -> Result<Self, DomainError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DomainError::BadArgs(
                    "Transcription API key not configured (set CLIPIX_TRANSCRIPTION_API_KEY)"
                        .to_string(),
                )
            })?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::AdapterFail(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/audio/transcriptions",
                config.api_base.trim_end_matches('/')
            ),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TranscribePort for OpenAiTranscribeAdapter {
    #[instrument(skip(self, audio_path), fields(audio = %audio_path.display()))]
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, DomainError> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| DomainError::fs("reading audio for transcription", e))?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| DomainError::AdapterFail(e.to_string()))?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .text("timestamp_granularities[]", "word");
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        info!(endpoint = %self.endpoint, model = %self.model, "transcribing audio");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::AdapterFail(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::AdapterFail(format!("HTTP {}: {}", status, body.trim())));
        }

        let parsed: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| DomainError::AdapterFail(format!("Malformed response: {}", e)))?;

        let result = parsed.into_result(language);
        info!(
            characters = result.text.len(),
            segments = result.segments.len(),
            "transcription completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_json_mapping_trims_segments() {
        let body = r#"{
            "task": "transcribe",
            "language": "english",
            "duration": 5.2,
            "text": " Hi there",
            "segments": [
                {"id": 0, "start": 0.0, "end": 2.0, "text": " Hi ", "tokens": [1, 2]},
                {"id": 1, "start": 2.0, "end": 5.2, "text": " there"}
            ],
            "words": [{"word": "Hi", "start": 0.0, "end": 1.0}]
        }"#;
        let parsed: VerboseTranscription = serde_json::from_str(body).unwrap();
        let result = parsed.into_result(Some("en"));

        assert_eq!(result.language.as_deref(), Some("english"));
        assert_eq!(result.duration, Some(5.2));
        assert_eq!(result.text, " Hi there");
        assert_eq!(
            result.segments,
            vec![
                CaptionSegment::new(0.0, 2.0, "Hi"),
                CaptionSegment::new(2.0, 5.2, "there"),
            ]
        );
    }

    #[test]
    fn test_missing_language_falls_back_to_request() {
        let parsed: VerboseTranscription = serde_json::from_str(r#"{"text": "hola"}"#).unwrap();
        let result = parsed.into_result(Some("es"));
        assert_eq!(result.language.as_deref(), Some("es"));
        assert!(result.segments.is_empty());
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = TranscriptionConfig::default();
        assert!(OpenAiTranscribeAdapter::new(&config).is_err());

        config.api_key = Some("   ".to_string());
        assert!(OpenAiTranscribeAdapter::new(&config).is_err());

        config.api_key = Some("sk-test".to_string());
        config.api_base = "http://localhost:9000/v1/".to_string();
        let adapter = OpenAiTranscribeAdapter::new(&config).unwrap();
        assert_eq!(adapter.endpoint, "http://localhost:9000/v1/audio/transcriptions");
    }
}
