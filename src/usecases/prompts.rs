//! Prompt construction for outline and slide generation.

use crate::domain::{AccessibilityMode, DomainError, OutlineItem};

/// Instruction for the outline step.
///
/// The keyword line only appears when keywords are given.
pub fn outline_prompt(
    knowledge_text: &str,
    concepts: &[String],
    accessibility: AccessibilityMode,
    keywords: &[String],
) -> String {
    let label = accessibility.label();
    let concept_list = concepts
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("\n");
    let keyword_line = if keywords.is_empty() {
        String::new()
    } else {
        format!("Optional Keywords: {}", keywords.join(", "))
    };

    format!(
        r#"You are an expert educational content creator. Create a structured learning outline for {label} learners.

Guidelines for {label} learners:
{guidance}

Knowledge Content:
{knowledge_text}

Required Concepts to Cover:
{concept_list}

{keyword_line}

Please generate:
1. A Mermaid.js mindmap diagram showing the topic hierarchy
2. A detailed outline with 5-8 main topics

Return your response as JSON with this exact structure:
{{
  "diagram": "mindmap\n  root((Topic Name))\n    Subtopic 1\n      Detail A\n      Detail B",
  "items": [
    {{
      "id": "unique-id-1",
      "title": "Topic Title",
      "type": "core",
      "description": "Brief description",
      "order": 1
    }}
  ]
}}

Types can be: "core" (essential), "optional" (supplementary), "custom" (user-added)

Make sure all required concepts are covered as "core" topics."#,
        guidance = accessibility.guidance().outline,
    )
}

/// Instruction for the slide step. Embeds the outline as pretty-printed JSON.
pub fn slides_prompt(
    outline: &[OutlineItem],
    accessibility: AccessibilityMode,
) -> Result<String, DomainError> {
    let outline_json = serde_json::to_string_pretty(outline)
        .map_err(|e| DomainError::InvalidInput(format!("Cannot serialize outline: {}", e)))?;

    Ok(format!(
        r#"You are creating educational slides for {label} learners.

Guidelines:
{guidance}

Outline to Convert:
{outline_json}

For each outline item, create a slide with:
- Title (clear and concise)
- Concept (1 sentence summary)
- Bullets (3-5 key points, student-facing)
- Teacher Script (conversational teaching notes, 2-3 paragraphs)

Return a JSON array with one slide per outline item ({count} in total), in outline order:
[
  {{
    "slide_order": 1,
    "title": "Introduction to Topic",
    "concept": "One sentence explaining the core concept",
    "bullets": [
      {{ "id": "b1", "text": "First key point", "order": 1 }},
      {{ "id": "b2", "text": "Second key point", "order": 2 }}
    ],
    "teacher_script": "Conversational teaching notes...",
    "duration_seconds": 180
  }}
]

Make the teacher script natural and engaging, as if speaking to students."#,
        label = accessibility.label(),
        guidance = accessibility.guidance().slides,
        count = outline.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concepts() -> Vec<String> {
        vec!["Light Reactions".to_string(), "Calvin Cycle".to_string()]
    }

    #[test]
    fn test_outline_prompt_embeds_inputs() {
        let prompt = outline_prompt(
            "Photosynthesis occurs in chloroplasts.",
            &concepts(),
            AccessibilityMode::Dyslexia,
            &[],
        );
        assert!(prompt.contains("for Dyslexia learners"));
        assert!(prompt.contains(AccessibilityMode::Dyslexia.guidance().outline));
        assert!(prompt.contains("Photosynthesis occurs in chloroplasts."));
        assert!(prompt.contains("1. Light Reactions\n2. Calvin Cycle"));
        assert!(!prompt.contains("Optional Keywords"));
        assert!(prompt.contains("\"diagram\": \"mindmap"));
    }

    #[test]
    fn test_outline_prompt_keywords() {
        let keywords = vec!["chlorophyll".to_string(), "ATP".to_string()];
        let prompt = outline_prompt("text", &concepts(), AccessibilityMode::General, &keywords);
        assert!(prompt.contains("Optional Keywords: chlorophyll, ATP"));
    }

    #[test]
    fn test_unknown_mode_prompts_like_general() {
        let unknown = outline_prompt("text", &concepts(), AccessibilityMode::parse("Kinesthetic"), &[]);
        let general = outline_prompt("text", &concepts(), AccessibilityMode::General, &[]);
        assert_eq!(unknown, general);
    }

    #[test]
    fn test_unknown_mode_slides_prompt_like_general() {
        let outline = vec![OutlineItem::core("1", "Light Reactions", 1)];
        let unknown = slides_prompt(&outline, AccessibilityMode::parse("Kinesthetic")).unwrap();
        let general = slides_prompt(&outline, AccessibilityMode::General).unwrap();
        assert_eq!(unknown, general);
    }

    #[test]
    fn test_slides_prompt_embeds_outline() {
        let outline = vec![OutlineItem::core("1", "Light Reactions", 1)];
        let prompt = slides_prompt(&outline, AccessibilityMode::Adhd).unwrap();
        assert!(prompt.contains("for ADHD learners"));
        assert!(prompt.contains(AccessibilityMode::Adhd.guidance().slides));
        assert!(prompt.contains("\"title\": \"Light Reactions\""));
        assert!(prompt.contains("(1 in total)"));
    }
}
