use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use paradero_core::models::RUBRIC;
use paradero_llm::extraction::{compose_context, ensure_baseline, extract_fields};
use serde_json::{Map, Value};

use crate::dto::{non_blank, FillTableRequest};
use crate::error::ApiError;
use crate::services::DraftService;
use crate::state::AppState;

const NO_DRAFT: &str = "Primero debe generar y guardar las 3 descripciones.";

/// Older clients post no body at all
fn parse_request(body: &Bytes) -> Result<FillTableRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FillTableRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request("Cuerpo JSON inválido.").with_details(e.to_string()))
}

/// Fill the characteristics table of a draft from its three descriptions
pub async fn fill_table(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let request = parse_request(&body)?;
    let raw = non_blank(request.draft_id.as_deref()).ok_or_else(|| ApiError::bad_request(NO_DRAFT))?;
    let draft_id = DraftService::parse_id(raw)?;
    let analysis = DraftService::analysis(&state, draft_id).await?;

    ensure_baseline(&analysis).inspect_err(|e| {
        tracing::warn!(draft_id = %draft_id, error = %e, "Draft not ready for extraction");
    })?;

    tracing::info!(draft_id = %draft_id, "Extracting characteristics");
    let context = compose_context(&analysis);
    let fields = extract_fields(state.generator.as_ref(), &context, RUBRIC)
        .await
        .inspect_err(|e| tracing::error!(draft_id = %draft_id, error = %e, "Extraction failed"))?;

    Ok(Json(fields))
}
