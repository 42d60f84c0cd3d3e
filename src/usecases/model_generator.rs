//! Live lesson generator. Prompts a text model and parses its replies.
//!
//! Upstream and parse failures both surface as `DomainError::Generation`. There is
//! no retry and no fallback to mock content once a call has been attempted.

use super::prompts;
use crate::domain::{
    AccessibilityMode, BulletPoint, DomainError, OutlineItem, OutlineItemKind, OutlineResult,
    Slide, extract_payload, entities::string_or_number,
};
use crate::ports::{LessonGenerator, TextModelPort};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Spoken pace used to estimate slide duration when the model omits it.
const WORDS_PER_MINUTE: usize = 150;
const MIN_SLIDE_SECONDS: u32 = 60;

/// Output-token budgets per generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudgets {
    pub outline: u32,
    pub slides: u32,
}

impl Default for TokenBudgets {
    fn default() -> Self {
        Self {
            outline: 4000,
            slides: 8000,
        }
    }
}

/// [`LessonGenerator`] backed by a [`TextModelPort`].
pub struct ModelLessonGenerator {
    model: Arc<dyn TextModelPort>,
    budgets: TokenBudgets,
}

impl ModelLessonGenerator {
    pub fn new(model: Arc<dyn TextModelPort>, budgets: TokenBudgets) -> Self {
        Self { model, budgets }
    }

    async fn outline(
        &self,
        knowledge_text: &str,
        concepts: &[String],
        accessibility: AccessibilityMode,
        keywords: &[String],
    ) -> Result<OutlineResult, DomainError> {
        let prompt = prompts::outline_prompt(knowledge_text, concepts, accessibility, keywords);
        let reply = self.model.complete(&prompt, self.budgets.outline).await?;
        let mut result: OutlineResult = parse_reply(&reply)?;
        ensure_core_concepts(&mut result, concepts);
        Ok(result)
    }

    async fn slides(
        &self,
        outline: &[OutlineItem],
        accessibility: AccessibilityMode,
    ) -> Result<Vec<Slide>, DomainError> {
        let prompt = prompts::slides_prompt(outline, accessibility)?;
        let reply = self.model.complete(&prompt, self.budgets.slides).await?;
        let slides = parse_reply::<SlidesReply>(&reply)?.into_slides();
        if slides.len() != outline.len() {
            return Err(DomainError::MalformedOutput(format!(
                "expected {} slides, model returned {}",
                outline.len(),
                slides.len()
            )));
        }
        Ok(slides)
    }
}

#[async_trait::async_trait]
impl LessonGenerator for ModelLessonGenerator {
    fn strategy(&self) -> &'static str {
        self.model.provider()
    }

    async fn generate_outline(
        &self,
        knowledge_text: &str,
        concepts: &[String],
        accessibility: AccessibilityMode,
        keywords: &[String],
    ) -> Result<OutlineResult, DomainError> {
        info!(
            provider = self.model.provider(),
            accessibility = %accessibility,
            concepts = concepts.len(),
            keywords = keywords.len(),
            "generating outline"
        );
        let result = self
            .outline(knowledge_text, concepts, accessibility, keywords)
            .await
            .map_err(|e| {
                warn!(error = %e, "outline generation failed");
                DomainError::Generation(format!("Failed to generate outline: {}", e))
            })?;
        info!(items = result.items.len(), "generated outline");
        Ok(result)
    }

    async fn generate_slides(
        &self,
        outline: &[OutlineItem],
        accessibility: AccessibilityMode,
    ) -> Result<Vec<Slide>, DomainError> {
        if outline.is_empty() {
            return Err(DomainError::InvalidInput(
                "Outline must not be empty".to_string(),
            ));
        }
        info!(
            provider = self.model.provider(),
            accessibility = %accessibility,
            items = outline.len(),
            "generating slides"
        );
        let slides = self.slides(outline, accessibility).await.map_err(|e| {
            warn!(error = %e, "slide generation failed");
            DomainError::Generation(format!("Failed to generate slides: {}", e))
        })?;
        info!(slides = slides.len(), "generated slides");
        Ok(slides)
    }
}

/// Extract the payload from a reply and decode it.
fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, DomainError> {
    let payload = extract_payload(reply);
    debug!(
        reply_len = reply.len(),
        fenced = payload.is_fenced(),
        "extracted model payload"
    );
    serde_json::from_str(payload.text()).map_err(|e| {
        warn!(
            error = %e,
            json = %payload.text().chars().take(200).collect::<String>(),
            "JSON parse failed"
        );
        DomainError::MalformedOutput(e.to_string())
    })
}

/// Append a `core` item for every required concept the model left out.
///
/// A concept counts as covered when a `core` item's title contains it,
/// ignoring case.
fn ensure_core_concepts(result: &mut OutlineResult, concepts: &[String]) {
    for concept in concepts {
        let needle = concept.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let covered = result
            .items
            .iter()
            .any(|i| i.kind == OutlineItemKind::Core && i.title.to_lowercase().contains(&needle));
        if covered {
            continue;
        }
        warn!(concept = %concept, "model omitted required concept; adding core item");
        let order = result.items.iter().map(|i| i.order).max().unwrap_or(0) + 1;
        result.items.push(OutlineItem {
            id: format!("outline-{}", order),
            title: concept.clone(),
            kind: OutlineItemKind::Core,
            description: Some(format!("Learn about {}", concept)),
            order,
        });
    }
}

/// Slides as the model writes them: a bare array or wrapped in `{"slides": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SlidesReply {
    Bare(Vec<LlmSlide>),
    Wrapped { slides: Vec<LlmSlide> },
}

impl SlidesReply {
    fn into_slides(self) -> Vec<Slide> {
        let raw = match self {
            SlidesReply::Bare(s) | SlidesReply::Wrapped { slides: s } => s,
        };
        raw.into_iter()
            .enumerate()
            .map(|(i, s)| s.into_slide(i))
            .collect()
    }
}

#[derive(Deserialize)]
struct LlmSlide {
    #[serde(default, alias = "slide_order")]
    order: Option<u32>,
    title: String,
    concept: String,
    bullets: Vec<LlmBullet>,
    #[serde(alias = "teacherScript")]
    teacher_script: String,
    #[serde(default, alias = "durationSeconds")]
    duration_seconds: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LlmBullet {
    Full {
        #[serde(default, deserialize_with = "optional_id")]
        id: Option<String>,
        text: String,
        #[serde(default)]
        order: Option<u32>,
    },
    Text(String),
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    string_or_number(deserializer).map(Some)
}

impl LlmSlide {
    fn into_slide(self, index: usize) -> Slide {
        let bullets = self
            .bullets
            .into_iter()
            .enumerate()
            .map(|(j, b)| {
                let n = (j + 1) as u32;
                let (id, text, order) = match b {
                    LlmBullet::Full { id, text, order } => (id, text, order),
                    LlmBullet::Text(text) => (None, text, None),
                };
                BulletPoint {
                    id: id.unwrap_or_else(|| format!("b{}-{}", index, n)),
                    text,
                    order: order.unwrap_or(n),
                }
            })
            .collect();
        let duration_seconds = self
            .duration_seconds
            .unwrap_or_else(|| estimate_duration(&self.teacher_script));
        Slide {
            order: self.order.unwrap_or((index + 1) as u32),
            title: self.title,
            concept: self.concept,
            bullets,
            teacher_script: self.teacher_script,
            duration_seconds,
        }
    }
}

/// Seconds needed to read a script aloud.
pub fn estimate_duration(script: &str) -> u32 {
    let words = script.split_whitespace().count();
    let seconds = (words * 60).div_ceil(WORDS_PER_MINUTE) as u32;
    seconds.max(MIN_SLIDE_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted model: returns a fixed reply (or error) and records prompts.
    struct FakeModel {
        reply: Result<String, String>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl FakeModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl TextModelPort for FakeModel {
        fn provider(&self) -> &'static str {
            "fake"
        }

        async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));
            self.reply.clone().map_err(DomainError::Upstream)
        }
    }

    fn generator(model: Arc<FakeModel>) -> ModelLessonGenerator {
        ModelLessonGenerator::new(model, TokenBudgets::default())
    }

    fn concepts() -> Vec<String> {
        vec!["Light Reactions".to_string(), "Calvin Cycle".to_string()]
    }

    const OUTLINE_JSON: &str = r#"{
  "diagram": "mindmap\n  root((Photosynthesis))",
  "items": [
    {"id": "1", "title": "Light Reactions", "type": "core", "order": 1},
    {"id": "2", "title": "The Calvin Cycle", "type": "core", "description": "Carbon fixation", "order": 2},
    {"id": "3", "title": "Leaf Anatomy", "type": "optional", "order": 3}
  ]
}"#;

    #[tokio::test]
    async fn test_outline_from_fenced_reply() {
        let reply = format!("Sure! Here's the outline:\n```json\n{}\n```\nEnjoy.", OUTLINE_JSON);
        let model = FakeModel::replying(&reply);
        let result = generator(model.clone())
            .generate_outline("text", &concepts(), AccessibilityMode::Hearing, &[])
            .await
            .unwrap();

        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[2].kind, OutlineItemKind::Optional);

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 4000);
        assert!(calls[0].0.contains(AccessibilityMode::Hearing.guidance().outline));
    }

    #[tokio::test]
    async fn test_outline_fenced_and_bare_agree() {
        let bare = generator(FakeModel::replying(OUTLINE_JSON))
            .generate_outline("text", &concepts(), AccessibilityMode::General, &[])
            .await
            .unwrap();
        let fenced = generator(FakeModel::replying(&format!("```json\n{}\n```", OUTLINE_JSON)))
            .generate_outline("text", &concepts(), AccessibilityMode::General, &[])
            .await
            .unwrap();
        assert_eq!(bare, fenced);
    }

    #[tokio::test]
    async fn test_outline_adds_missing_core_concept() {
        let reply = r#"{"diagram": "mindmap", "items": [
            {"id": "1", "title": "Light Reactions", "type": "core", "order": 1},
            {"id": "2", "title": "Calvin Cycle", "type": "optional", "order": 2}
        ]}"#;
        let result = generator(FakeModel::replying(reply))
            .generate_outline("text", &concepts(), AccessibilityMode::General, &[])
            .await
            .unwrap();

        assert_eq!(result.items.len(), 3);
        let added = &result.items[2];
        assert_eq!(added.title, "Calvin Cycle");
        assert_eq!(added.kind, OutlineItemKind::Core);
        assert_eq!(added.order, 3);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_generation_failure() {
        let err = generator(FakeModel::replying("I could not produce an outline, sorry."))
            .generate_outline("text", &concepts(), AccessibilityMode::General, &[])
            .await
            .unwrap_err();
        match err {
            DomainError::Generation(msg) => {
                assert!(msg.starts_with("Failed to generate outline: malformed model output"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_message_and_never_mocks() {
        let err = generator(FakeModel::failing("API error 429: rate limited"))
            .generate_outline("text", &concepts(), AccessibilityMode::General, &[])
            .await
            .unwrap_err();
        match err {
            DomainError::Generation(msg) => assert!(msg.contains("API error 429: rate limited")),
            other => panic!("unexpected error: {other}"),
        }
    }

    const SLIDES_JSON: &str = r#"[
  {
    "slide_order": 1,
    "title": "Light Reactions",
    "concept": "Light energy becomes chemical energy.",
    "bullets": [
      {"id": "b1", "text": "Happen in thylakoids", "order": 1},
      {"id": "b2", "text": "Produce ATP and NADPH", "order": 2},
      {"id": "b3", "text": "Release oxygen", "order": 3}
    ],
    "teacher_script": "Let's talk about light.",
    "duration_seconds": 120
  },
  {
    "title": "Calvin Cycle",
    "concept": "Carbon dioxide becomes sugar.",
    "bullets": ["Uses ATP", "Fixes carbon", "Makes G3P"],
    "teacher_script": "Now the dark reactions."
  }
]"#;

    fn outline_items() -> Vec<OutlineItem> {
        vec![
            OutlineItem::core("1", "Light Reactions", 1),
            OutlineItem::core("2", "Calvin Cycle", 2),
        ]
    }

    #[tokio::test]
    async fn test_slides_from_plain_fence() {
        let reply = format!("```\n{}\n```", SLIDES_JSON);
        let model = FakeModel::replying(&reply);
        let slides = generator(model.clone())
            .generate_slides(&outline_items(), AccessibilityMode::Adhd)
            .await
            .unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].duration_seconds, 120);
        assert_eq!(slides[1].order, 2);
        assert_eq!(slides[1].bullets[2].id, "b1-3");
        assert_eq!(slides[1].bullets[2].text, "Makes G3P");
        assert_eq!(slides[1].duration_seconds, MIN_SLIDE_SECONDS);
        assert_eq!(model.calls.lock().unwrap()[0].1, 8000);
    }

    #[tokio::test]
    async fn test_slides_wrapped_object_accepted() {
        let reply = format!("{{\"slides\": {}}}", SLIDES_JSON);
        let slides = generator(FakeModel::replying(&reply))
            .generate_slides(&outline_items(), AccessibilityMode::General)
            .await
            .unwrap();
        assert_eq!(slides.len(), 2);
    }

    #[tokio::test]
    async fn test_slide_count_mismatch_fails() {
        let err = generator(FakeModel::replying(SLIDES_JSON))
            .generate_slides(
                &[OutlineItem::core("1", "Light Reactions", 1)],
                AccessibilityMode::General,
            )
            .await
            .unwrap_err();
        match err {
            DomainError::Generation(msg) => assert!(msg.contains("expected 1 slides")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_slides_missing_array_fails() {
        let err = generator(FakeModel::replying(r#"{"result": "ok"}"#))
            .generate_slides(&outline_items(), AccessibilityMode::General)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
    }

    #[tokio::test]
    async fn test_empty_outline_skips_model() {
        let model = FakeModel::replying(SLIDES_JSON);
        let err = generator(model.clone())
            .generate_slides(&[], AccessibilityMode::General)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_estimate_duration() {
        assert_eq!(estimate_duration(""), MIN_SLIDE_SECONDS);
        let script = "word ".repeat(300);
        assert_eq!(estimate_duration(&script), 120);
    }
}
