//! Whisper-compatible speech-to-text adapter (OpenAI `/v1/audio/transcriptions`).

use crate::domain::{AudioClip, DomainError};
use crate::ports::TranscriptionPort;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

pub struct WhisperAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl WhisperAdapter {
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Transcription(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    fn form(&self, clip: &AudioClip) -> Result<Form, DomainError> {
        let file_name = if clip.file_name.is_empty() {
            "audio.webm".to_string()
        } else {
            clip.file_name.clone()
        };
        let part = Part::bytes(clip.bytes.clone())
            .file_name(file_name)
            .mime_str(&clip.mime_type)
            .map_err(|e| DomainError::Transcription(format!("Invalid MIME type: {}", e)))?;
        Ok(Form::new()
            .part("file", part)
            .text("model", self.model.clone()))
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait::async_trait]
impl TranscriptionPort for WhisperAdapter {
    fn strategy(&self) -> &'static str {
        "whisper"
    }

    async fn transcribe(&self, clip: &AudioClip) -> Result<String, DomainError> {
        info!(
            file = %clip.file_name,
            bytes = clip.bytes.len(),
            mime = %clip.mime_type,
            "sending audio for transcription"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(self.form(clip)?)
            .send()
            .await
            .map_err(|e| DomainError::Transcription(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "transcription API returned error");
            return Err(DomainError::Transcription(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: TranscriptionResponse = response.json().await.map_err(|e| {
            DomainError::Transcription(format!("Failed to parse API response: {}", e))
        })?;

        info!(text_len = body.text.len(), "transcription complete");
        Ok(body.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> WhisperAdapter {
        WhisperAdapter::new(
            "http://localhost:9/v1/audio/transcriptions".to_string(),
            "key".to_string(),
            "whisper-1".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn clip(mime: &str) -> AudioClip {
        AudioClip {
            bytes: vec![1, 2, 3],
            file_name: String::new(),
            mime_type: mime.to_string(),
        }
    }

    #[test]
    fn test_form_accepts_audio_mime() {
        assert!(adapter().form(&clip("audio/webm")).is_ok());
    }

    #[test]
    fn test_form_rejects_garbage_mime() {
        let err = adapter().form(&clip("not a mime")).unwrap_err();
        assert!(matches!(err, DomainError::Transcription(_)));
    }
}
