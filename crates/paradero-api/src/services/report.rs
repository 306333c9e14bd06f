use paradero_core::models::{merge_saved, AnalysisMap, StopRecord};
use paradero_report::{ReportBuilder, ReportRequest};
use paradero_store::resolve::resolve_file_ids;

use crate::dto::{non_blank, GenerateReportRequest};
use crate::error::ApiError;
use crate::services::{DraftService, FolderService};
use crate::state::AppState;

/// Service turning a report request into document bytes
pub struct ReportService;

impl ReportService {
    /// Merge the draft into every stop and settle the well-known file ids.
    ///
    /// A folder name triggers Drive lookups; otherwise the supplied ids are
    /// used as they are.
    pub async fn prepare(
        state: &AppState,
        request: GenerateReportRequest,
    ) -> Result<ReportRequest, ApiError> {
        let saved = match non_blank(request.draft_id.as_deref()) {
            Some(raw) => DraftService::analysis(state, DraftService::parse_id(raw)?).await?,
            None => AnalysisMap::new(),
        };

        let info = request.info_proyecto.unwrap_or_default();
        let supplied = request.drive_file_ids.filter(|ids| !ids.is_empty());

        let file_ids = match (info.folder_name(), supplied) {
            (Some(folder_name), _) => {
                let folder_id = FolderService::find(state, folder_name).await?.ok_or_else(|| {
                    ApiError::not_found(format!(
                        "No se encontró la carpeta '{}' en Drive (o no tienes permisos).",
                        folder_name
                    ))
                })?;
                resolve_file_ids(state.files.as_ref(), &folder_id).await
            }
            (None, Some(ids)) => ids,
            (None, None) => {
                return Err(ApiError::bad_request(
                    "Debe indicar \"info_proyecto.folder_name\" o proveer \"drive_file_ids\".",
                ))
            }
        };

        let stops = merge_draft(request.paraderos.unwrap_or_default(), &saved);

        Ok(ReportRequest {
            info,
            stops,
            file_ids,
        })
    }

    pub async fn render(state: &AppState, request: &ReportRequest) -> Result<Vec<u8>, ApiError> {
        ReportBuilder::new(state.files.as_ref())
            .build(request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Report generation failed");
                ApiError::internal("No se pudo generar el documento.").with_details(e.to_string())
            })
    }
}

/// Overlay the saved analysis on every stop; saved entries win
pub fn merge_draft(stops: Vec<StopRecord>, saved: &AnalysisMap) -> Vec<StopRecord> {
    if saved.is_empty() {
        return stops;
    }
    stops
        .into_iter()
        .map(|mut stop| {
            stop.analisis = merge_saved(&stop.analisis, saved);
            stop
        })
        .collect()
}

/// `attachment` header value for `Informe_{stem}.docx`
///
/// The quoted `filename` is an ASCII fallback; `filename*` carries the
/// UTF-8 name percent-encoded (RFC 6266 / RFC 5987).
pub fn content_disposition(stem: &str) -> String {
    let name: String = stem
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let name = format!("Informe_{}.docx", name);
    let fallback: String = name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        encode_ext_value(&name)
    )
}

fn encode_ext_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
