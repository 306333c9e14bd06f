use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        .route("/api/gem-health", get(handlers::gem_health))

        // Drive
        .route("/api/list-images", post(handlers::list_images))

        // Descriptions and drafts
        .route("/api/analyze-image", post(handlers::analyze_image))
        .route("/api/drafts", post(handlers::create_draft))
        .route("/api/drafts/{draft_id}", get(handlers::get_draft))
        .route("/api/save-description", post(handlers::save_description))
        .route("/api/fill-table", post(handlers::fill_table))

        // Report
        .route("/api/generate-report", post(handlers::generate_report))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
