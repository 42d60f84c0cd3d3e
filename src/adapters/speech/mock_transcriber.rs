//! Mock transcriber for running without a speech API key.

use crate::domain::{AudioClip, DomainError};
use crate::ports::TranscriptionPort;
use tracing::info;

pub const MOCK_TRANSCRIPT: &str = "[Mock transcription] This is a placeholder. \
     Configure a transcription API key to enable real transcription.";

/// Returns [`MOCK_TRANSCRIPT`] for every clip. No network.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockTranscriber;

impl MockTranscriber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TranscriptionPort for MockTranscriber {
    fn strategy(&self) -> &'static str {
        "mock"
    }

    async fn transcribe(&self, clip: &AudioClip) -> Result<String, DomainError> {
        info!(
            file = %clip.file_name,
            bytes = clip.bytes.len(),
            "[MOCK] returning mock transcription"
        );
        Ok(MOCK_TRANSCRIPT.to_string())
    }
}
