//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AudioClip, DomainError};

/// Generative text model. One prompt in, free-form text out.
#[async_trait::async_trait]
pub trait TextModelPort: Send + Sync {
    /// Provider name for logs (e.g. "anthropic").
    fn provider(&self) -> &'static str;

    /// Send a single user prompt and return the model's textual reply.
    ///
    /// # Errors
    /// `DomainError::Upstream` on network failure, timeout, non-2xx status or an
    /// empty reply.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DomainError>;
}

/// Speech-to-text service.
#[async_trait::async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Strategy name for logs and the health probe.
    fn strategy(&self) -> &'static str;

    async fn transcribe(&self, clip: &AudioClip) -> Result<String, DomainError>;
}
