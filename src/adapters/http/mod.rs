//! HTTP adapter. Axum router over the inbound ports.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiResult};

use crate::ports::{LessonGenerator, TranscriptionPort};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Headroom for multipart framing on top of the audio size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn LessonGenerator>,
    pub transcriber: Arc<dyn TranscriptionPort>,
    /// Deployment label reported by the health probe
    pub environment: String,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn LessonGenerator>,
        transcriber: Arc<dyn TranscriptionPort>,
        environment: String,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            generator,
            transcriber,
            environment,
            max_upload_bytes,
        }
    }
}

/// Paths served, for the startup banner.
pub const ENDPOINTS: [(&str, &str); 4] = [
    ("GET", "/api/health"),
    ("POST", "/api/transcribe"),
    ("POST", "/api/generate-outline"),
    ("POST", "/api/generate-slides"),
];

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes + MULTIPART_OVERHEAD;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/generate-outline", post(handlers::generate_outline))
        .route("/api/generate-slides", post(handlers::generate_slides))
        .route(
            "/api/transcribe",
            post(handlers::transcribe).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
