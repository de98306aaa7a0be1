//! Per-panel illustration
//!
//! One image request per panel, no retry. The first response part carrying
//! inline bytes is decoded; any text parts alongside it are ignored.

use crate::provider::{ContentPart, GenerateRequest, GenerationProvider};
use comicbook_core::{ComicError, Result};
use image::DynamicImage;

/// Renders illustration requests into raster images through a provider
pub struct PanelRenderer<'a> {
    provider: &'a dyn GenerationProvider,
    model: String,
}

impl<'a> PanelRenderer<'a> {
    pub fn new(provider: &'a dyn GenerationProvider, model: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
        }
    }

    /// Render one illustration request.
    ///
    /// Returns `Ok(None)` when the response carries no image; provider
    /// failures and undecodable image bytes are errors.
    pub fn render(&self, prompt: &str) -> Result<Option<DynamicImage>> {
        let request = GenerateRequest::image(&self.model, prompt);
        let parts = self.provider.generate_content(&request)?;
        first_image(&parts)
    }
}

/// Decode the first inline-data part, if any
pub fn first_image(parts: &[ContentPart]) -> Result<Option<DynamicImage>> {
    let Some(bytes) = parts.iter().find_map(ContentPart::inline_data) else {
        return Ok(None);
    };
    image::load_from_memory(bytes)
        .map(Some)
        .map_err(|e| ComicError::ImageError(format!("Failed to decode panel image: {}", e)))
}
