//! Inbound port. The HTTP adapter calls into the application through it.

use crate::domain::{AccessibilityMode, DomainError, OutlineItem, OutlineResult, Slide};

/// Lesson content generation.
///
/// Two strategies implement this: a live one backed by a text model and a
/// deterministic mock used when no model credential is configured. Which one
/// runs is decided once, from configuration, when the application is wired.
#[async_trait::async_trait]
pub trait LessonGenerator: Send + Sync {
    /// Short name of the strategy, for logs and the health probe.
    fn strategy(&self) -> &'static str;

    /// Build a course outline from teacher-supplied knowledge.
    ///
    /// Callers must pass non-empty `knowledge_text` and `concepts`; they are not
    /// validated here. Every concept ends up as at least one `core` item.
    async fn generate_outline(
        &self,
        knowledge_text: &str,
        concepts: &[String],
        accessibility: AccessibilityMode,
        keywords: &[String],
    ) -> Result<OutlineResult, DomainError>;

    /// Produce exactly one slide per outline item, in outline order.
    ///
    /// # Errors
    /// `InvalidInput` for an empty outline; `Generation` when the live call or
    /// its parsing fails. Never returns a partial sequence.
    async fn generate_slides(
        &self,
        outline: &[OutlineItem],
        accessibility: AccessibilityMode,
    ) -> Result<Vec<Slide>, DomainError>;
}
