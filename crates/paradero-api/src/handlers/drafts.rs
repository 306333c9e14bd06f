use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use paradero_core::error::ParaderoError;
use paradero_core::models::{AnalysisEntry, DraftId};

use crate::dto::{
    non_blank, DraftCreatedResponse, DraftResponse, SaveDescriptionRequest,
    SaveDescriptionResponse,
};
use crate::error::ApiError;
use crate::services::DraftService;
use crate::state::AppState;

async fn new_draft(state: &AppState) -> Result<DraftId, ApiError> {
    state.drafts.create().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create draft");
        ApiError::internal("Failed to create draft").with_details(e.to_string())
    })
}

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<DraftCreatedResponse>), ApiError> {
    let draft_id = new_draft(&state).await?;
    tracing::info!(draft_id = %draft_id, "Draft created");

    Ok((StatusCode::CREATED, Json(DraftCreatedResponse { draft_id })))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<String>,
) -> Result<Json<DraftResponse>, ApiError> {
    let draft_id = DraftService::parse_id(&draft_id)?;
    let analisis = DraftService::analysis(&state, draft_id).await?;

    Ok(Json(DraftResponse { draft_id, analisis }))
}

/// Save one category of a draft. Without a draft id a new draft is created.
pub async fn save_description(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveDescriptionRequest>,
) -> Result<Json<SaveDescriptionResponse>, ApiError> {
    let (prompt_type, description) =
        match (non_blank(request.prompt_type.as_deref()), request.description) {
            (Some(prompt_type), Some(description)) => (prompt_type, description),
            _ => return Err(ApiError::bad_request("Faltan datos (prompt_type o description)")),
        };

    let draft_id = match non_blank(request.draft_id.as_deref()) {
        Some(raw) => DraftService::parse_id(raw)?,
        None => new_draft(&state).await?,
    };

    let entry = AnalysisEntry::new(description, request.image_ids.unwrap_or_default());
    state
        .drafts
        .save(draft_id, prompt_type, entry)
        .await
        .map_err(|e| match e {
            ParaderoError::NotFound { .. } => DraftService::unknown(&draft_id.to_string()),
            other => {
                tracing::error!(draft_id = %draft_id, error = %other, "Failed to save description");
                ApiError::from(other)
            }
        })?;

    tracing::info!(draft_id = %draft_id, prompt_type = %prompt_type, "Description saved");
    Ok(Json(SaveDescriptionResponse::saved(prompt_type, draft_id)))
}
