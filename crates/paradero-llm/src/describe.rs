use crate::ports::{Generator, ImageInput};

/// Prefix of the text returned in place of a description when generation fails
pub const DESCRIPTION_ERROR_PREFIX: &str = "Error al generar descripción: ";

/// Describe a set of images with one generation call.
///
/// Never fails: on any error the returned text starts with
/// [`DESCRIPTION_ERROR_PREFIX`] followed by the reason, so it can be shown
/// to the user and edited before being saved.
pub async fn describe(generator: &dyn Generator, prompt: &str, images: &[ImageInput]) -> String {
    match generator.generate(prompt, images).await {
        Ok(text) => {
            tracing::info!(images = images.len(), model = generator.model_name(), "Description generated");
            text
        }
        Err(e) => {
            tracing::error!(error = %e, images = images.len(), "Description failed");
            format!("{}{}", DESCRIPTION_ERROR_PREFIX, e)
        }
    }
}

pub fn is_failed_description(text: &str) -> bool {
    text.starts_with(DESCRIPTION_ERROR_PREFIX)
}
