use std::sync::Arc;

use axum::{extract::State, Json};
use paradero_core::models::Lookup;
use paradero_llm::{describe, prompts::prompt_for};
use paradero_store::resolve::resolve_file_ids;

use crate::dto::{
    non_blank, AnalyzeImageRequest, DescriptionResponse, ListImagesRequest, ListImagesResponse,
};
use crate::error::ApiError;
use crate::services::{FolderService, ImageService};
use crate::state::AppState;

pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ListImagesRequest>,
) -> Result<Json<ListImagesResponse>, ApiError> {
    let folder_id = request.folder_id();
    let folder_name = request.folder_name();
    tracing::info!(folder_id = ?folder_id, folder = ?folder_name, "Listing folder images");

    let access = state.files.check_access().await.map_err(|e| {
        tracing::error!(error = %e, "Drive authentication failed");
        ApiError::internal("No se pudo autenticar con Drive.").with_details(e.to_string())
    })?;

    let folder_id = match (folder_id, folder_name) {
        (Some(id), _) => id.to_string(),
        (None, Some(name)) => FolderService::find(&state, name).await?.ok_or_else(|| {
            ApiError::not_found(format!(
                "No se encontró la carpeta '{}' (o la SA no tiene permisos).",
                name
            ))
        })?,
        (None, None) => return Err(ApiError::bad_request("Falta 'folder_name' o 'folder_id'.")),
    };

    let images = match state.files.list_images(&folder_id).await {
        Lookup::Found(images) => images,
        Lookup::NotFound => {
            return Err(ApiError::not_found(format!(
                "No se encontró la carpeta '{}' (o la SA no tiene permisos).",
                folder_id
            )))
        }
        Lookup::TransportError(reason) => {
            tracing::error!(folder_id = %folder_id, error = %reason, "Failed to list images");
            return Err(
                ApiError::internal("No se pudieron listar las imágenes de la carpeta.")
                    .with_details(reason),
            );
        }
    };

    let drive_file_ids = resolve_file_ids(state.files.as_ref(), &folder_id).await;
    tracing::info!(folder_id = %folder_id, images = images.len(), "Folder listed");

    Ok(Json(ListImagesResponse {
        ok: true,
        tablas: drive_file_ids.tablas_id.clone(),
        folder_id,
        service_account: access.account,
        images,
        drive_file_ids,
    }))
}

pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Result<Json<DescriptionResponse>, ApiError> {
    let image_ids: Vec<String> = request
        .image_ids
        .unwrap_or_default()
        .into_iter()
        .filter(|id| !id.trim().is_empty())
        .collect();
    let prompt_type = match non_blank(request.prompt_type.as_deref()) {
        Some(prompt_type) if !image_ids.is_empty() => prompt_type,
        _ => return Err(ApiError::bad_request("Faltan image_ids o prompt_type")),
    };
    tracing::info!(prompt_type = %prompt_type, images = image_ids.len(), "Analyzing images");

    state.files.check_access().await.map_err(|e| {
        tracing::error!(error = %e, "Drive authentication failed");
        ApiError::internal("Fallo en la autenticación con Google Drive").with_details(e.to_string())
    })?;

    let images = ImageService::download_all(&state, &image_ids).await;
    if images.is_empty() {
        tracing::error!(image_ids = ?image_ids, "No image could be downloaded");
        return Err(ApiError::internal(
            "No se pudieron descargar las imágenes seleccionadas",
        ));
    }

    let prompt = prompt_for(prompt_type, request.codigo_paradero.as_deref());
    let description = describe(state.generator.as_ref(), &prompt, &images).await;

    Ok(Json(DescriptionResponse { description }))
}
