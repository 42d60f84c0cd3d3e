//! Route handlers. Validate request shape, then delegate to the ports.

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::domain::{AccessibilityMode, AudioClip, OutlineItem, OutlineResult, Slide};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutlineRequest {
    pub knowledge_text: Option<String>,
    pub concepts: Option<Vec<String>>,
    pub accessibility: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateSlidesRequest {
    /// Kept untyped so a non-array outline is reported distinctly.
    pub outline: Option<Value>,
    pub accessibility: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlidesResponse {
    pub slides: Vec<Slide>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub text: String,
    pub file_size: usize,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub generator: &'static str,
    pub transcriber: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.environment.clone(),
        generator: state.generator.strategy(),
        transcriber: state.transcriber.strategy(),
    })
}

/// POST /api/generate-outline
pub async fn generate_outline(
    State(state): State<AppState>,
    payload: Result<Json<GenerateOutlineRequest>, JsonRejection>,
) -> ApiResult<Json<OutlineResult>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (Some(knowledge_text), Some(concepts), Some(accessibility)) = (
        non_blank(request.knowledge_text),
        request.concepts.filter(|c| !c.is_empty()),
        non_blank(request.accessibility),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: knowledgeText, concepts, accessibility".to_string(),
        ));
    };

    let mode = AccessibilityMode::parse(&accessibility);
    info!(accessibility = %mode, requested = %accessibility, "outline requested");

    let keywords = request.keywords.unwrap_or_default();
    let result = state
        .generator
        .generate_outline(&knowledge_text, &concepts, mode, &keywords)
        .await?;
    Ok(Json(result))
}

/// POST /api/generate-slides
pub async fn generate_slides(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSlidesRequest>, JsonRejection>,
) -> ApiResult<Json<SlidesResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (Some(outline), Some(accessibility)) = (
        request.outline.filter(|v| !v.is_null()),
        non_blank(request.accessibility),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: outline, accessibility".to_string(),
        ));
    };

    let outline: Vec<OutlineItem> = OutlineItem::list_from_json(&outline)?;
    let mode = AccessibilityMode::parse(&accessibility);
    info!(items = outline.len(), accessibility = %mode, "slides requested");

    let slides = state.generator.generate_slides(&outline, mode).await?;
    Ok(Json(SlidesResponse { slides }))
}

/// POST /api/transcribe (multipart, field `audio`)
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<TranscribeResponse>> {
    let mut multipart =
        multipart.map_err(|_| ApiError::BadRequest("No audio file provided".to_string()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.webm").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !is_audio(&mime_type) {
            return Err(ApiError::BadRequest(
                "Only audio files are allowed".to_string(),
            ));
        }
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.is_empty() {
            return Err(ApiError::BadRequest("No audio file provided".to_string()));
        }
        if bytes.len() > state.max_upload_bytes {
            return Err(ApiError::PayloadTooLarge(format!(
                "Audio file exceeds {} bytes",
                state.max_upload_bytes
            )));
        }

        info!(file = %file_name, size = bytes.len(), mime = %mime_type, "transcribing audio");
        let clip = AudioClip {
            bytes: bytes.to_vec(),
            file_name,
            mime_type,
        };
        let text = state.transcriber.transcribe(&clip).await?;
        return Ok(Json(TranscribeResponse {
            text,
            file_size: clip.bytes.len(),
            mime_type: clip.mime_type,
        }));
    }

    Err(ApiError::BadRequest("No audio file provided".to_string()))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

fn is_audio(mime_type: &str) -> bool {
    mime_type.starts_with("audio/") || mime_type == "video/webm"
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio() {
        assert!(is_audio("audio/webm"));
        assert!(is_audio("audio/mpeg"));
        assert!(is_audio("video/webm"));
        assert!(!is_audio("video/mp4"));
        assert!(!is_audio("application/octet-stream"));
    }

    #[test]
    fn test_outline_request_field_names() {
        let request: GenerateOutlineRequest = serde_json::from_value(json!({
            "knowledgeText": "k",
            "concepts": ["a"],
            "accessibility": "ADHD"
        }))
        .unwrap();
        assert_eq!(request.knowledge_text.as_deref(), Some("k"));
        assert!(request.keywords.is_none());
    }
}
