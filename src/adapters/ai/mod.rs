//! AI adapter module. Implements TextModelPort for LLM integration.
//!
//! Provides the Anthropic Messages adapter (default) and an OpenAI-compatible one.

pub mod anthropic_adapter;
pub mod openai_adapter;

pub use anthropic_adapter::AnthropicAdapter;
pub use openai_adapter::OpenAiAdapter;

use crate::domain::DomainError;
use crate::ports::TextModelPort;
use crate::shared::config::{AiProvider, AppConfig};
use std::sync::Arc;
use std::time::Duration;

/// Build the configured text model, or `None` when no API key is set.
pub fn model_from_config(cfg: &AppConfig) -> Result<Option<Arc<dyn TextModelPort>>, DomainError> {
    let Some(api_key) = cfg.ai_api_key() else {
        return Ok(None);
    };
    let timeout = Duration::from_secs(cfg.ai_timeout_secs_or_default());
    let url = cfg.ai_api_url_or_default();
    let model = cfg.ai_model_or_default();
    let adapter: Arc<dyn TextModelPort> = match cfg.provider() {
        AiProvider::Anthropic => Arc::new(AnthropicAdapter::new(url, api_key, model, timeout)?),
        AiProvider::OpenAi => Arc::new(OpenAiAdapter::new(url, api_key, model, timeout)?),
    };
    Ok(Some(adapter))
}
