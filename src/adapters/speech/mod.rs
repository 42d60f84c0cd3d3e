//! Speech adapters. Implement TranscriptionPort.
//!
//! Whisper-compatible HTTP adapter, and a mock used when no key is configured.

pub mod mock_transcriber;
pub mod whisper_adapter;

pub use mock_transcriber::MockTranscriber;
pub use whisper_adapter::WhisperAdapter;

use crate::domain::DomainError;
use crate::ports::TranscriptionPort;
use crate::shared::config::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Whisper when a transcription key is configured, the mock otherwise.
pub fn transcriber_from_config(cfg: &AppConfig) -> Result<Arc<dyn TranscriptionPort>, DomainError> {
    match cfg.transcription_api_key() {
        Some(api_key) => {
            info!(
                model = %cfg.transcription_model_or_default(),
                url = %cfg.transcription_api_url_or_default(),
                "transcription enabled with Whisper adapter"
            );
            Ok(Arc::new(WhisperAdapter::new(
                cfg.transcription_api_url_or_default(),
                api_key,
                cfg.transcription_model_or_default(),
                Duration::from_secs(cfg.ai_timeout_secs_or_default()),
            )?))
        }
        None => {
            warn!("no transcription key configured, using mock transcriber");
            Ok(Arc::new(MockTranscriber::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_uses_mock() {
        let transcriber = transcriber_from_config(&AppConfig::default()).unwrap();
        assert_eq!(transcriber.strategy(), "mock");
    }

    #[test]
    fn test_blank_key_uses_mock() {
        let cfg = AppConfig {
            transcription_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(transcriber_from_config(&cfg).unwrap().strategy(), "mock");
    }

    #[test]
    fn test_key_uses_whisper() {
        let cfg = AppConfig {
            transcription_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(transcriber_from_config(&cfg).unwrap().strategy(), "whisper");
    }
}
