use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use paradero_report::DOCX_MIME_TYPE;

use crate::dto::GenerateReportRequest;
use crate::error::ApiError;
use crate::services::{content_disposition, ReportService};
use crate::state::AppState;

pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(
        draft_id = ?request.draft_id,
        stops = request.paraderos.as_ref().map_or(0, Vec::len),
        folder = ?request.info_proyecto.as_ref().and_then(|info| info.folder_name()),
        "Generating report"
    );

    let report = ReportService::prepare(&state, request).await?;
    let bytes = ReportService::render(&state, &report).await?;

    let disposition = HeaderValue::from_bytes(content_disposition(report.info.file_stem()).as_bytes())
        .map_err(|e| {
            tracing::error!(error = %e, "Invalid download file name");
            ApiError::internal("No se pudo generar el documento.").with_details(e.to_string())
        })?;

    tracing::info!(bytes = bytes.len(), stops = report.stops.len(), "Report generated");
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
