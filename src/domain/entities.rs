//! Domain entities. Pure data structures for lesson authoring.
//!
//! No HTTP/model types here; adapters map their wire formats into these.

use super::DomainError;
use serde::{Deserialize, Deserializer, Serialize};

/// Role of an outline item in the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineItemKind {
    /// Essential topic. Every required concept maps to one of these.
    #[serde(alias = "Core", alias = "CORE")]
    Core,
    /// Supplementary topic suggested by the model.
    #[serde(alias = "Optional", alias = "OPTIONAL")]
    Optional,
    /// Added by the teacher in the authoring UI.
    #[serde(alias = "Custom", alias = "CUSTOM")]
    Custom,
}

/// One topic node of a generated course outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: OutlineItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display ranking. Not required to be unique.
    pub order: u32,
}

impl OutlineItem {
    pub fn core(id: impl Into<String>, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: OutlineItemKind::Core,
            description: None,
            order,
        }
    }

    /// Decode an outline supplied as untyped JSON.
    ///
    /// A value that is not an array is rejected separately from an empty array,
    /// so callers can report the two cases differently.
    pub fn list_from_json(value: &serde_json::Value) -> Result<Vec<OutlineItem>, DomainError> {
        let entries = value
            .as_array()
            .ok_or_else(|| DomainError::InvalidInput("Outline must be an array".to_string()))?;
        if entries.is_empty() {
            return Err(DomainError::InvalidInput(
                "Outline must not be empty".to_string(),
            ));
        }
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                OutlineItem::deserialize(entry).map_err(|e| {
                    DomainError::InvalidInput(format!("Invalid outline item {}: {}", i + 1, e))
                })
            })
            .collect()
    }
}

/// Mind-map diagram plus ordered outline items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Mind-map description in Mermaid `mindmap` syntax.
    #[serde(alias = "mermaid")]
    pub diagram: String,
    pub items: Vec<OutlineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletPoint {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub text: String,
    pub order: u32,
}

/// One narrated slide, produced per outline item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(rename = "slide_order", alias = "order")]
    pub order: u32,
    pub title: String,
    /// One-sentence summary.
    pub concept: String,
    pub bullets: Vec<BulletPoint>,
    #[serde(alias = "teacherScript")]
    pub teacher_script: String,
    #[serde(alias = "durationSeconds")]
    pub duration_seconds: u32,
}

/// Uploaded audio handed to the transcription port.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

/// Models occasionally emit numeric ids; keep them as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(f) => f.to_string(),
    })
}
