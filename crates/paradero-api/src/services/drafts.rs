use paradero_core::models::{AnalysisMap, DraftId};

use crate::error::ApiError;
use crate::state::AppState;

/// Draft id parsing and lookup shared by the draft-aware handlers
pub struct DraftService;

impl DraftService {
    /// Malformed ids are reported like unknown ones
    pub fn parse_id(raw: &str) -> Result<DraftId, ApiError> {
        raw.parse().map_err(|_| {
            tracing::warn!(draft_id = %raw, "Malformed draft id");
            Self::unknown(raw)
        })
    }

    /// Saved analysis of a draft, 404 when the draft does not exist
    pub async fn analysis(state: &AppState, id: DraftId) -> Result<AnalysisMap, ApiError> {
        state
            .drafts
            .get(id)
            .await
            .map_err(|e| {
                tracing::error!(draft_id = %id, error = %e, "Failed to read draft");
                ApiError::internal("Failed to read draft").with_details(e.to_string())
            })?
            .ok_or_else(|| Self::unknown(&id.to_string()))
    }

    pub fn unknown(raw: &str) -> ApiError {
        ApiError::not_found(format!("No existe el borrador '{}'.", raw))
    }
}
