//! Generation provider trait and request/response types

use comicbook_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output modality requested from a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => write!(f, "TEXT"),
            Modality::Image => write!(f, "IMAGE"),
        }
    }
}

/// A single request to a generative model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-2.5-flash-lite")
    pub model: String,
    /// Full prompt text
    pub prompt: String,
    /// Modalities the response may contain
    pub modalities: Vec<Modality>,
}

impl GenerateRequest {
    /// A text-only request
    pub fn text(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            modalities: vec![Modality::Text],
        }
    }

    /// A request whose response may carry text and images
    pub fn image(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            modalities: vec![Modality::Text, Modality::Image],
        }
    }
}

/// One part of a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Decoded binary payload (e.g. PNG bytes)
    InlineData { mime_type: String, data: Vec<u8> },
}

impl ContentPart {
    /// Raw bytes if this part carries inline data
    pub fn inline_data(&self) -> Option<&[u8]> {
        match self {
            ContentPart::InlineData { data, .. } => Some(data),
            ContentPart::Text(_) => None,
        }
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderStatus::Available => write!(f, "available"),
            ProviderStatus::Unavailable(reason) => write!(f, "unavailable ({})", reason),
        }
    }
}

/// Trait implemented by each model provider (Gemini, Mock).
///
/// Calls block until the full response has arrived. Transport and auth
/// failures are returned as errors; there is no retry at this layer.
pub trait GenerationProvider {
    /// Provider name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Run a text-only request and return the response text
    fn generate_text(&self, request: &GenerateRequest) -> Result<String>;

    /// Run a request and return every part of the first candidate response
    fn generate_content(&self, request: &GenerateRequest) -> Result<Vec<ContentPart>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_modalities() {
        let text = GenerateRequest::text("m", "p");
        assert_eq!(text.modalities, vec![Modality::Text]);
        let image = GenerateRequest::image("m", "p");
        assert_eq!(image.modalities, vec![Modality::Text, Modality::Image]);
    }

    #[test]
    fn test_modality_serializes_uppercase() {
        let json = serde_json::to_string(&vec![Modality::Text, Modality::Image]).unwrap();
        assert_eq!(json, r#"["TEXT","IMAGE"]"#);
    }

    #[test]
    fn test_inline_data_accessor() {
        let part = ContentPart::InlineData {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(part.inline_data(), Some(&[1u8, 2, 3][..]));
        assert_eq!(ContentPart::Text("hi".to_string()).inline_data(), None);
    }
}
