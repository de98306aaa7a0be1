//! Gemini provider (Google Generative Language REST API)
//!
//! Both the panel breakdown and the panel illustrations go through
//! `models/{model}:generateContent`; only the requested response
//! modalities differ. Calls block until the whole response is read.

use crate::config::ComicConfig;
use crate::provider::*;
use base64::Engine;
use comicbook_core::{ComicError, Result};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Inline images arrive base64-encoded in the JSON body
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Gemini provider for text and image generation
pub struct GeminiProvider {
    api_key: String,
    api_url: String,
    timeout_secs: u64,
}

impl GeminiProvider {
    /// Create a new GeminiProvider from config
    pub fn from_config(config: &ComicConfig) -> Result<Self> {
        let api_key = config
            .api_key("gemini")
            .ok_or_else(|| {
                ComicError::ProviderError(
                    "Gemini API key not configured. Set GOOGLE_API_KEY or add to .comicbook/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("gemini")
            .unwrap_or(DEFAULT_GEMINI_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = config.timeout_secs("gemini").unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            api_url,
            timeout_secs,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    fn post(&self, request: &GenerateRequest) -> Result<WireResponse> {
        let payload = request_payload(request);
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Sending generateContent request"
        );

        let agent = build_agent(self.timeout_secs);
        let mut response = agent
            .post(&self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                ComicError::ProviderError(format!("Gemini API request failed: {}", e))
            })?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_json::<WireResponse>()
            .map_err(|e| {
                ComicError::ProviderError(format!("Failed to parse Gemini response: {}", e))
            })
    }
}

fn build_agent(timeout_secs: u64) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build();
    config.into()
}

fn request_payload(request: &GenerateRequest) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }
        ],
        "generationConfig": {
            "responseModalities": request.modalities
        }
    })
}

impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate_text(&self, request: &GenerateRequest) -> Result<String> {
        let parts = self.post(request)?.into_parts()?;
        collect_text(&parts).ok_or_else(|| {
            ComicError::ProviderError(format!(
                "Gemini model '{}' returned no text",
                request.model
            ))
        })
    }

    fn generate_content(&self, request: &GenerateRequest) -> Result<Vec<ContentPart>> {
        self.post(request)?.into_parts()
    }
}

/// Concatenate all text parts, or `None` if there are none
fn collect_text(parts: &[ContentPart]) -> Option<String> {
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text(t) => Some(t.as_str()),
            ContentPart::InlineData { .. } => None,
        })
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

impl WireResponse {
    /// Parts of the first candidate, with inline data base64-decoded.
    ///
    /// A response without candidates yields no parts.
    fn into_parts(self) -> Result<Vec<ContentPart>> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            tracing::warn!("Gemini response contained no candidates");
            return Ok(Vec::new());
        };
        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!(finish_reason = %reason, "Gemini candidate finished");
        }

        let wire_parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let mut parts = Vec::with_capacity(wire_parts.len());
        for part in wire_parts {
            if let Some(inline) = part.inline_data {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(inline.data.as_bytes())
                    .map_err(|e| {
                        ComicError::ProviderError(format!("Invalid base64 inline data: {}", e))
                    })?;
                parts.push(ContentPart::InlineData {
                    mime_type: inline.mime_type,
                    data,
                });
            } else if let Some(text) = part.text {
                parts.push(ContentPart::Text(text));
            }
        }
        Ok(parts)
    }
}

/// Parse a raw generateContent JSON body into content parts
pub fn parse_gemini_response(json: &str) -> Result<Vec<ContentPart>> {
    let response: WireResponse = serde_json::from_str(json)
        .map_err(|e| ComicError::ProviderError(format!("Invalid JSON: {}", e)))?;
    response.into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_response() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "PANEL 1\n" }, { "text": "Image Prompt: a duck" }]
                    },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": { "promptTokenCount": 12 }
        }"#;

        let parts = parse_gemini_response(json).unwrap();
        assert_eq!(collect_text(&parts).unwrap(), "PANEL 1\nImage Prompt: a duck");
    }

    #[test]
    fn test_parse_image_response() {
        // "PNG" base64-encoded
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "Here is your panel." },
                            { "inlineData": { "mimeType": "image/png", "data": "UE5H" } }
                        ]
                    }
                }
            ]
        }"#;

        let parts = parse_gemini_response(json).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], ContentPart::Text("Here is your panel.".to_string()));
        assert_eq!(
            parts[1],
            ContentPart::InlineData {
                mime_type: "image/png".to_string(),
                data: b"PNG".to_vec(),
            }
        );
    }

    #[test]
    fn test_parse_no_candidates() {
        let json = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;
        assert!(parse_gemini_response(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_base64() {
        let json = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"!!!"}}]}}]}"#;
        assert!(parse_gemini_response(json).is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_gemini_response("not json").is_err());
    }

    #[test]
    fn test_collect_text_none_for_image_only() {
        let parts = vec![ContentPart::InlineData {
            mime_type: "image/png".to_string(),
            data: vec![0],
        }];
        assert!(collect_text(&parts).is_none());
    }

    #[test]
    fn test_request_payload_shape() {
        let request = GenerateRequest::image("gemini-image", "draw a cat");
        let payload = request_payload(&request);
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "draw a cat");
        assert_eq!(
            payload["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = ComicConfig::default();
        assert!(GeminiProvider::from_config(&config).is_err());
    }

    #[test]
    fn test_endpoint_uses_configured_url() {
        let mut config = ComicConfig::default();
        config.providers.insert(
            "gemini".to_string(),
            crate::config::ProviderConfig {
                api_key: Some("k".to_string()),
                api_url: Some("http://localhost:9999/v1beta/".to_string()),
                timeout_secs: None,
                enabled: None,
            },
        );
        let provider = GeminiProvider::from_config(&config).unwrap();
        assert_eq!(
            provider.endpoint("gemini-2.5-flash-lite"),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
        assert_eq!(provider.health_check().unwrap(), ProviderStatus::Available);
    }
}
