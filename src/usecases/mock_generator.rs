//! Mock lesson generator. Used when no model credential is configured.
//!
//! Builds outlines and slides straight from the inputs. Deterministic, no network.

use crate::domain::{
    AccessibilityMode, BulletPoint, DomainError, OutlineItem, OutlineItemKind, OutlineResult,
    Slide,
};
use crate::ports::LessonGenerator;
use tracing::info;

/// Estimated duration of every mock slide.
pub const MOCK_SLIDE_SECONDS: u32 = 180;

/// Network-free [`LessonGenerator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLessonGenerator;

impl MockLessonGenerator {
    pub fn new() -> Self {
        Self
    }

    /// One `core` item per concept plus a mind-map skeleton.
    pub fn outline(concepts: &[String]) -> OutlineResult {
        OutlineResult {
            diagram: mock_diagram(concepts),
            items: concepts
                .iter()
                .enumerate()
                .map(|(i, concept)| OutlineItem {
                    id: format!("outline-{}", i + 1),
                    title: concept.clone(),
                    kind: OutlineItemKind::Core,
                    description: Some(format!("Learn about {}", concept)),
                    order: (i + 1) as u32,
                })
                .collect(),
        }
    }

    /// One slide per item, three templated bullets each.
    pub fn slides(outline: &[OutlineItem]) -> Vec<Slide> {
        outline
            .iter()
            .enumerate()
            .map(|(i, item)| Slide {
                order: (i + 1) as u32,
                title: item.title.clone(),
                concept: item
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| format!("Understanding {}", item.title)),
                bullets: vec![
                    bullet(i, 1, format!("Introduction to {}", item.title)),
                    bullet(i, 2, "Key concepts and definitions".to_string()),
                    bullet(i, 3, "Practical applications".to_string()),
                ],
                teacher_script: format!(
                    "Welcome to our discussion on {}. In this section, we'll explore the \
                     fundamental concepts and see how they apply in real-world scenarios. \
                     Let's dive in!",
                    item.title
                ),
                duration_seconds: MOCK_SLIDE_SECONDS,
            })
            .collect()
    }
}

fn bullet(slide_index: usize, n: u32, text: String) -> BulletPoint {
    BulletPoint {
        id: format!("b{}-{}", slide_index, n),
        text,
        order: n,
    }
}

/// Mermaid mindmap: one branch per concept, placeholders when there are none.
fn mock_diagram(concepts: &[String]) -> String {
    const BRANCHES: [[&str; 2]; 2] = [["Introduction", "Key Points"], ["Examples", "Practice"]];

    let placeholders;
    let names: &[String] = if concepts.is_empty() {
        placeholders = vec!["Concept 1".to_string(), "Concept 2".to_string()];
        &placeholders
    } else {
        concepts
    };

    let mut diagram = String::from("mindmap\n  root((Learning Topic))");
    for (i, name) in names.iter().enumerate() {
        diagram.push_str(&format!("\n    {}", name));
        for leaf in BRANCHES[i % BRANCHES.len()] {
            diagram.push_str(&format!("\n      {}", leaf));
        }
    }
    diagram
}

#[async_trait::async_trait]
impl LessonGenerator for MockLessonGenerator {
    fn strategy(&self) -> &'static str {
        "mock"
    }

    async fn generate_outline(
        &self,
        _knowledge_text: &str,
        concepts: &[String],
        accessibility: AccessibilityMode,
        _keywords: &[String],
    ) -> Result<OutlineResult, DomainError> {
        info!(
            concepts = concepts.len(),
            accessibility = %accessibility,
            "[MOCK] returning mock outline"
        );
        Ok(Self::outline(concepts))
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
            items = outline.len(),
            accessibility = %accessibility,
            "[MOCK] returning mock slides"
        );
        Ok(Self::slides(outline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_photosynthesis_outline() {
        let generator = MockLessonGenerator::new();
        let concepts = strings(&["Light Reactions", "Calvin Cycle"]);
        let result = generator
            .generate_outline(
                "Photosynthesis occurs in chloroplasts.",
                &concepts,
                AccessibilityMode::General,
                &[],
            )
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
        assert!(result.items.iter().all(|i| i.kind == OutlineItemKind::Core));
        assert_eq!(result.items[0].title, "Light Reactions");
        assert_eq!(result.items[1].title, "Calvin Cycle");
        assert_eq!(result.items[1].order, 2);
        assert!(result.diagram.starts_with("mindmap"));
        assert!(result.diagram.contains("Calvin Cycle"));
    }

    #[test]
    fn test_outline_one_core_item_per_concept() {
        for n in 1..=8 {
            let concepts: Vec<String> = (0..n).map(|i| format!("Concept {}", i)).collect();
            let result = MockLessonGenerator::outline(&concepts);
            assert_eq!(result.items.len(), concepts.len());
            for (item, concept) in result.items.iter().zip(&concepts) {
                assert_eq!(item.kind, OutlineItemKind::Core);
                assert_eq!(&item.title, concept);
            }
        }
    }

    #[test]
    fn test_diagram_placeholders_without_concepts() {
        let result = MockLessonGenerator::outline(&[]);
        assert!(result.items.is_empty());
        assert!(result.diagram.contains("Concept 1"));
        assert!(result.diagram.contains("Concept 2"));
    }

    #[tokio::test]
    async fn test_adhd_single_slide_has_three_bullets() {
        let generator = MockLessonGenerator::new();
        let outline = vec![OutlineItem::core("1", "Light Reactions", 1)];
        let slides = generator
            .generate_slides(&outline, AccessibilityMode::Adhd)
            .await
            .unwrap();

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Light Reactions");
        assert_eq!(slides[0].bullets.len(), 3);
        assert_eq!(slides[0].concept, "Understanding Light Reactions");
        assert_eq!(slides[0].duration_seconds, MOCK_SLIDE_SECONDS);
    }

    #[test]
    fn test_slides_follow_outline_order() {
        let outline = MockLessonGenerator::outline(&strings(&["A", "B", "C"])).items;
        let slides = MockLessonGenerator::slides(&outline);
        assert_eq!(slides.len(), outline.len());
        for (i, (slide, item)) in slides.iter().zip(&outline).enumerate() {
            assert_eq!(slide.title, item.title);
            assert_eq!(slide.order, (i + 1) as u32);
            assert_eq!(slide.concept, format!("Learn about {}", item.title));
        }
    }

    #[tokio::test]
    async fn test_empty_outline_rejected() {
        let err = MockLessonGenerator::new()
            .generate_slides(&[], AccessibilityMode::General)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
