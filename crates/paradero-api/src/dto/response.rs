use paradero_core::models::{AnalysisMap, DraftId, DriveFile, DriveFileIds};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            service: "paradero-api".to_string(),
        }
    }
}

/// Images of a project folder plus its well-known files
#[derive(Debug, Serialize)]
pub struct ListImagesResponse {
    pub ok: bool,
    pub folder_id: String,
    pub service_account: Option<String>,
    pub images: Vec<DriveFile>,
    pub drive_file_ids: DriveFileIds,
    /// Same as `drive_file_ids.tablas_id`, kept for older clients
    pub tablas: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DraftCreatedResponse {
    pub draft_id: DraftId,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft_id: DraftId,
    pub analisis: AnalysisMap,
}

#[derive(Debug, Serialize)]
pub struct SaveDescriptionResponse {
    pub status: String,
    pub message: String,
    pub draft_id: DraftId,
}

impl SaveDescriptionResponse {
    pub fn saved(prompt_type: &str, draft_id: DraftId) -> Self {
        Self {
            status: "ok".to_string(),
            message: format!("Descripción para \"{}\" guardada correctamente.", prompt_type),
            draft_id,
        }
    }
}

/// AI key availability
#[derive(Debug, Serialize)]
pub struct GemHealthResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
