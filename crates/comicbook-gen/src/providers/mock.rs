//! Mock provider for testing
//!
//! Answers breakdown requests with a fixed number of well-formed panel
//! blocks and illustration requests with solid-color PNGs, without any
//! network calls.

use crate::prompt::render_breakdown;
use crate::provider::*;
use comicbook_core::{ComicError, PanelSpec, Result, MAX_PANELS};
use std::io::Cursor;

pub const DEFAULT_MOCK_IMAGE_SIZE: u32 = 256;

/// A mock provider that generates placeholder panels locally
pub struct MockProvider {
    panel_count: usize,
    image_size: u32,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(MAX_PANELS)
    }
}

impl MockProvider {
    /// Mock that answers breakdown requests with `panel_count` panels
    pub fn new(panel_count: usize) -> Self {
        Self {
            panel_count,
            image_size: DEFAULT_MOCK_IMAGE_SIZE,
        }
    }

    /// Override the edge length of generated square images
    pub fn with_image_size(mut self, image_size: u32) -> Self {
        self.image_size = image_size;
        self
    }

    fn breakdown(&self, prompt: &str) -> String {
        let tag = prompt_hash(prompt);
        let panels: Vec<PanelSpec> = (1..=self.panel_count)
            .map(|i| {
                PanelSpec::new(
                    i,
                    format!("Placeholder scene {} for story {:08x}", i, tag),
                    format!("Caption {}", i),
                )
            })
            .collect();
        format!("Here is your comic breakdown.\n\n{}", render_breakdown(&panels))
    }
}

impl GenerationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate_text(&self, request: &GenerateRequest) -> Result<String> {
        Ok(self.breakdown(&request.prompt))
    }

    fn generate_content(&self, request: &GenerateRequest) -> Result<Vec<ContentPart>> {
        if !request.modalities.contains(&Modality::Image) {
            return Ok(vec![ContentPart::Text(self.breakdown(&request.prompt))]);
        }

        let png = solid_png(prompt_hash(&request.prompt), self.image_size)?;
        Ok(vec![
            ContentPart::Text("Mock illustration".to_string()),
            ContentPart::InlineData {
                mime_type: "image/png".to_string(),
                data: png,
            },
        ])
    }
}

fn prompt_hash(prompt: &str) -> u32 {
    prompt
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
}

/// Encode a solid-color square PNG whose color comes from `seed`
fn solid_png(seed: u32, size: u32) -> Result<Vec<u8>> {
    let r = ((seed >> 16) & 0xFF) as u8;
    let g = ((seed >> 8) & 0xFF) as u8;
    let b = (seed & 0xFF) as u8;

    let img = image::RgbImage::from_pixel(size, size, image::Rgb([r, g, b]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ComicError::ImageError(format!("Failed to encode PNG: {}", e)))?;
    Ok(bytes)
}
