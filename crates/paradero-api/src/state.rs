use std::sync::Arc;

use paradero_llm::Generator;
use paradero_store::ports::{DraftStore, FileStore};

#[derive(Clone)]
pub struct AppState {
    pub files: Arc<dyn FileStore>,
    pub drafts: Arc<dyn DraftStore>,
    pub generator: Arc<dyn Generator>,
}

impl AppState {
    pub fn new(
        files: Arc<dyn FileStore>,
        drafts: Arc<dyn DraftStore>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            files,
            drafts,
            generator,
        }
    }
}
