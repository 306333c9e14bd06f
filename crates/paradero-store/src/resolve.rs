//! Folder and well-known file resolution on top of any [`FileStore`]

use crate::ports::FileStore;
use crate::query::{file_in_folder_query, folder_query};
use paradero_core::models::{DriveFileIds, Lookup, SearchScope, WellKnownFile};

/// Find a project folder by name, across every drive the account can see
pub async fn resolve_folder(store: &dyn FileStore, folder_name: &str) -> Lookup<String> {
    let lookup = store
        .resolve_id(&folder_query(folder_name), &SearchScope::AllDrives)
        .await;
    match &lookup {
        Lookup::Found(id) => tracing::info!(folder = %folder_name, folder_id = %id, "Folder resolved"),
        Lookup::NotFound => tracing::warn!(folder = %folder_name, "Folder not found"),
        Lookup::TransportError(reason) => {
            tracing::error!(folder = %folder_name, error = %reason, "Folder lookup failed")
        }
    }
    lookup
}

/// Try each candidate name of a well-known file in order.
///
/// The first hit wins. When nothing is found the result is a transport error
/// if any attempt failed on the wire, otherwise `NotFound`.
pub async fn resolve_well_known(
    store: &dyn FileStore,
    folder_id: &str,
    file: WellKnownFile,
) -> Lookup<String> {
    let mut failure = None;
    for name in file.candidates() {
        match store
            .resolve_id(&file_in_folder_query(folder_id, name), &SearchScope::AllDrives)
            .await
        {
            Lookup::Found(id) => return Lookup::Found(id),
            Lookup::NotFound => {}
            Lookup::TransportError(reason) => {
                tracing::warn!(folder_id = %folder_id, file = %name, error = %reason, "Lookup failed");
                failure = Some(reason);
            }
        }
    }
    match failure {
        Some(reason) => Lookup::TransportError(reason),
        None => Lookup::NotFound,
    }
}

/// Resolve every well-known file of a folder; missing ones stay `None`
pub async fn resolve_file_ids(store: &dyn FileStore, folder_id: &str) -> DriveFileIds {
    let mut ids = DriveFileIds::default();
    for file in WellKnownFile::ALL {
        ids.set(file, resolve_well_known(store, folder_id, file).await.found());
    }
    tracing::debug!(folder_id = %folder_id, ?ids, "Well-known files resolved");
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryFileStore;

    #[tokio::test]
    async fn test_first_candidate_hit_wins() {
        let store = MemoryFileStore::new()
            .with_query(file_in_folder_query("f1", "logo.jpg"), "logo-plain")
            .with_query(file_in_folder_query("f1", "logo2.png"), "logo-two");

        let found = resolve_well_known(&store, "f1", WellKnownFile::Logo).await;
        assert_eq!(found, Lookup::Found("logo-two".to_string()));
    }

    #[tokio::test]
    async fn test_transport_failure_reported_when_nothing_found() {
        let store = MemoryFileStore::new()
            .with_query_failure(file_in_folder_query("f1", "ubicacion.png"), "timeout");

        let found = resolve_well_known(&store, "f1", WellKnownFile::ProjectLocation).await;
        assert_eq!(found, Lookup::TransportError("timeout".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_file_ids() {
        let store = MemoryFileStore::new()
            .with_query(file_in_folder_query("f1", "Tablas.xlsx"), "t1")
            .with_query(file_in_folder_query("f1", "ubicacion_paraderos.jpg"), "p1");

        let ids = resolve_file_ids(&store, "f1").await;
        assert_eq!(ids.tablas_id.as_deref(), Some("t1"));
        assert_eq!(ids.img_ubicacion_paradas_id.as_deref(), Some("p1"));
        assert_eq!(ids.logo_id, None);
        assert_eq!(ids.img_ubicacion_proyecto_id, None);
    }

    #[tokio::test]
    async fn test_resolve_folder_uses_all_drives() {
        let store = MemoryFileStore::new().with_query(folder_query("Proyecto A"), "folder-a");

        assert_eq!(
            resolve_folder(&store, "Proyecto A").await,
            Lookup::Found("folder-a".to_string())
        );
        assert_eq!(store.lookups()[0].1, SearchScope::AllDrives);
        assert_eq!(resolve_folder(&store, "Proyecto B").await, Lookup::NotFound);
    }
}
