//! In-memory storage implementations for development and testing.
//!
//! Locks are taken with `unwrap()`: a poisoned lock means another thread
//! already panicked while holding it.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use paradero_core::error::{ParaderoError, Result};
use paradero_core::models::{
    AnalysisEntry, AnalysisMap, Draft, DraftId, DriveFile, Lookup, SearchScope,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{AccessInfo, DraftStore, FileStore};
use crate::query::filter_images;

/// Drafts older than this are dropped the next time a draft is created
pub const DEFAULT_DRAFT_TTL: TimeDelta = TimeDelta::hours(24);

/// In-memory implementation of DraftStore.
///
/// Expired drafts are swept on `create`, measured from their creation time.
#[derive(Debug, Clone)]
pub struct MemoryDraftStore {
    drafts: Arc<RwLock<HashMap<DraftId, Draft>>>,
    ttl: TimeDelta,
}

impl Default for MemoryDraftStore {
    fn default() -> Self {
        Self {
            drafts: Arc::default(),
            ttl: DEFAULT_DRAFT_TTL,
        }
    }
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn len(&self) -> usize {
        self.drafts.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn create(&self) -> Result<DraftId> {
        let draft = Draft::new();
        let id = draft.id;

        let mut drafts = self.drafts.write().unwrap();
        let before = drafts.len();
        let now = Utc::now();
        drafts.retain(|_, d| now - d.created_at < self.ttl);
        if drafts.len() < before {
            tracing::debug!(expired = before - drafts.len(), "Expired drafts removed");
        }
        drafts.insert(id, draft);
        Ok(id)
    }

    async fn save(&self, id: DraftId, category: &str, entry: AnalysisEntry) -> Result<()> {
        let mut drafts = self.drafts.write().unwrap();
        let draft = drafts
            .get_mut(&id)
            .ok_or_else(|| ParaderoError::not_found(format!("Draft {}", id)))?;
        draft.save(category, entry);
        Ok(())
    }

    async fn get(&self, id: DraftId) -> Result<Option<AnalysisMap>> {
        Ok(self.drafts.read().unwrap().get(&id).map(|d| d.analisis.clone()))
    }
}

/// In-memory FileStore that answers from canned responses.
///
/// Queries are matched verbatim, before trash scoping, so tests register
/// them with the builders in [`crate::query`]. Every lookup and download is
/// recorded for later assertions.
#[derive(Debug, Clone)]
pub struct MemoryFileStore {
    account: String,
    access_denied: Option<String>,
    queries: HashMap<String, Lookup<String>>,
    folders: HashMap<String, Lookup<Vec<DriveFile>>>,
    files: HashMap<String, Lookup<Vec<u8>>>,
    lookups: Arc<RwLock<Vec<(String, SearchScope)>>>,
    downloads: Arc<RwLock<Vec<String>>>,
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self {
            account: "reportes@paraderos.iam.gserviceaccount.com".to_string(),
            access_denied: None,
            queries: HashMap::new(),
            folders: HashMap::new(),
            files: HashMap::new(),
            lookups: Arc::default(),
            downloads: Arc::default(),
        }
    }
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Make `check_access` fail with an authentication error
    pub fn with_access_denied(mut self, reason: impl Into<String>) -> Self {
        self.access_denied = Some(reason.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>, id: impl Into<String>) -> Self {
        self.queries.insert(query.into(), Lookup::Found(id.into()));
        self
    }

    pub fn with_query_failure(mut self, query: impl Into<String>, reason: impl Into<String>) -> Self {
        self.queries
            .insert(query.into(), Lookup::TransportError(reason.into()));
        self
    }

    pub fn with_folder(mut self, folder_id: impl Into<String>, files: Vec<DriveFile>) -> Self {
        self.folders.insert(folder_id.into(), Lookup::Found(files));
        self
    }

    pub fn with_folder_failure(mut self, folder_id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.folders
            .insert(folder_id.into(), Lookup::TransportError(reason.into()));
        self
    }

    pub fn with_file(mut self, file_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.files.insert(file_id.into(), Lookup::Found(bytes));
        self
    }

    pub fn with_download_failure(mut self, file_id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.files
            .insert(file_id.into(), Lookup::TransportError(reason.into()));
        self
    }

    /// Queries seen by `resolve_id`, in call order
    pub fn lookups(&self) -> Vec<(String, SearchScope)> {
        self.lookups.read().unwrap().clone()
    }

    /// File ids seen by `download`, in call order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.read().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn check_access(&self) -> Result<AccessInfo> {
        match &self.access_denied {
            Some(reason) => Err(ParaderoError::Authentication {
                service: "Drive".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(AccessInfo {
                account: Some(self.account.clone()),
            }),
        }
    }

    async fn resolve_id(&self, query: &str, scope: &SearchScope) -> Lookup<String> {
        self.lookups
            .write()
            .unwrap()
            .push((query.to_string(), scope.clone()));
        self.queries.get(query).cloned().unwrap_or(Lookup::NotFound)
    }

    async fn list_images(&self, folder_id: &str) -> Lookup<Vec<DriveFile>> {
        self.folders
            .get(folder_id)
            .cloned()
            .unwrap_or(Lookup::Found(Vec::new()))
            .map(filter_images)
    }

    async fn download(&self, file_id: &str) -> Lookup<Vec<u8>> {
        self.downloads.write().unwrap().push(file_id.to_string());
        self.files.get(file_id).cloned().unwrap_or(Lookup::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str) -> AnalysisEntry {
        AnalysisEntry::new(description, vec!["img1".to_string()])
    }

    #[tokio::test]
    async fn test_draft_lifecycle() {
        let store = MemoryDraftStore::new();
        let id = store.create().await.unwrap();

        assert_eq!(store.get(id).await.unwrap(), Some(AnalysisMap::new()));

        store.save(id, "general", entry("uno")).await.unwrap();
        store.save(id, "senal", entry("dos")).await.unwrap();
        store.save(id, "general", entry("tres")).await.unwrap();

        let saved = store.get(id).await.unwrap().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved["general"].description, "tres");
        assert_eq!(saved["senal"].description, "dos");
    }

    #[tokio::test]
    async fn test_drafts_are_isolated() {
        let store = MemoryDraftStore::new();
        let a = store.create().await.unwrap();
        let b = store.create().await.unwrap();

        store.save(a, "general", entry("solo en a")).await.unwrap();

        assert!(store.get(b).await.unwrap().unwrap().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_expired_drafts_are_swept_on_create() {
        let store = MemoryDraftStore::new().with_ttl(TimeDelta::zero());
        let old = store.create().await.unwrap();
        let fresh = store.create().await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(old).await.unwrap(), None);
        assert!(store.get(fresh).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_default_ttl_keeps_recent_drafts() {
        let store = MemoryDraftStore::new();
        let first = store.create().await.unwrap();
        store.create().await.unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(first).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_draft() {
        let store = MemoryDraftStore::new();
        let missing = DraftId::new();

        assert_eq!(store.get(missing).await.unwrap(), None);
        let err = store.save(missing, "general", entry("x")).await.unwrap_err();
        assert!(matches!(err, ParaderoError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_file_store_records_calls() {
        let store = MemoryFileStore::new()
            .with_file("img1", vec![1, 2, 3])
            .with_download_failure("img2", "reset");

        assert_eq!(store.download("img1").await, Lookup::Found(vec![1, 2, 3]));
        assert_eq!(store.download("img2").await, Lookup::TransportError("reset".into()));
        assert_eq!(store.download("img3").await, Lookup::NotFound);
        assert_eq!(store.downloads(), vec!["img1", "img2", "img3"]);
        assert!(store.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_memory_file_store_filters_images() {
        let file = |id: &str, mime: &str| DriveFile {
            id: id.into(),
            name: format!("{id}.bin"),
            mime_type: Some(mime.into()),
            web_view_link: None,
        };
        let store = MemoryFileStore::new()
            .with_folder("f1", vec![file("a", "image/jpeg"), file("b", "text/plain")]);

        let images = store.list_images("f1").await.found().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, "a");
    }

    #[tokio::test]
    async fn test_access_denied() {
        let store = MemoryFileStore::new().with_access_denied("GOOGLE_CREDENTIALS not set");
        let err = store.check_access().await.unwrap_err();
        assert!(matches!(err, ParaderoError::Authentication { .. }));
    }
}
