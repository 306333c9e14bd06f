use async_trait::async_trait;
use paradero_core::error::Result;
use paradero_core::models::{AnalysisEntry, AnalysisMap, DraftId, DriveFile, Lookup, SearchScope};

/// Identity the file store authenticated as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessInfo {
    pub account: Option<String>,
}

/// Port for the remote file storage holding the project folders
///
/// Lookups never fail with an error: a missing file and a transport failure
/// are both reported through [`Lookup`] so callers can pick a placeholder.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Authenticate, returning the account in use
    async fn check_access(&self) -> Result<AccessInfo>;

    /// Identifier of the first file matching a query
    async fn resolve_id(&self, query: &str, scope: &SearchScope) -> Lookup<String>;

    /// Image files directly inside a folder
    async fn list_images(&self, folder_id: &str) -> Lookup<Vec<DriveFile>>;

    /// Full content of a file
    async fn download(&self, file_id: &str) -> Lookup<Vec<u8>>;
}

/// Port for caller-scoped analysis drafts
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Open an empty draft
    async fn create(&self) -> Result<DraftId>;

    /// Replace the entry for one category. Unknown drafts are `NotFound`.
    async fn save(&self, id: DraftId, category: &str, entry: AnalysisEntry) -> Result<()>;

    /// Saved entries of a draft, `None` when the draft does not exist
    async fn get(&self, id: DraftId) -> Result<Option<AnalysisMap>>;
}
