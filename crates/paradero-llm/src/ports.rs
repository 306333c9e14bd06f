//! LLM port definitions

use async_trait::async_trait;
use paradero_core::error::Result;

/// An image attached to a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageInput {
    /// Wrap raw bytes, sniffing the media type from their content
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            mime_type: crate::media::sniff_mime(&data).to_string(),
            data,
        }
    }
}

/// Port for multimodal text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate text from a prompt and zero or more images
    ///
    /// # Arguments
    /// * `prompt` - The generation prompt, sent as the first part
    /// * `images` - Images sent after the prompt, in order
    ///
    /// # Returns
    /// The concatenated text of the first candidate
    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String>;

    /// Whether an API key or equivalent is available
    fn is_configured(&self) -> bool;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}
