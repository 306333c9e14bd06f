use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::dto::{GemHealthResponse, HealthResponse};
use crate::state::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Reports whether the AI client has an API key; no model call is made
pub async fn gem_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<GemHealthResponse>) {
    if state.generator.is_configured() {
        return (
            StatusCode::OK,
            Json(GemHealthResponse {
                ok: true,
                error: None,
            }),
        );
    }

    tracing::warn!(model = state.generator.model_name(), "AI API key not configured");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(GemHealthResponse {
            ok: false,
            error: Some("GEMINI_API_KEY no está configurada.".to_string()),
        }),
    )
}
