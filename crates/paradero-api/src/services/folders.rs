use paradero_core::models::Lookup;
use paradero_store::resolve::resolve_folder;

use crate::error::ApiError;
use crate::state::AppState;

pub struct FolderService;

impl FolderService {
    /// Folder id for a name. `Ok(None)` means no visible folder has that name.
    pub async fn find(state: &AppState, folder_name: &str) -> Result<Option<String>, ApiError> {
        match resolve_folder(state.files.as_ref(), folder_name).await {
            Lookup::Found(id) => Ok(Some(id)),
            Lookup::NotFound => Ok(None),
            Lookup::TransportError(reason) => Err(ApiError::internal(format!(
                "Error al buscar la carpeta '{}' en Drive.",
                folder_name
            ))
            .with_details(reason)),
        }
    }
}
