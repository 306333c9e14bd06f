use paradero_core::models::Lookup;
use paradero_llm::ImageInput;

use crate::state::AppState;

pub struct ImageService;

impl ImageService {
    /// Download images one by one, skipping the ones that fail
    pub async fn download_all(state: &AppState, image_ids: &[String]) -> Vec<ImageInput> {
        let mut images = Vec::with_capacity(image_ids.len());
        for id in image_ids {
            match state.files.download(id).await {
                Lookup::Found(bytes) => images.push(ImageInput::from_bytes(bytes)),
                Lookup::NotFound => tracing::warn!(image_id = %id, "Image not found, skipped"),
                Lookup::TransportError(reason) => {
                    tracing::warn!(image_id = %id, error = %reason, "Image download failed, skipped")
                }
            }
        }
        images
    }
}
