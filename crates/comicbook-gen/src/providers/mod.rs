//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod gemini;
pub mod mock;

use crate::config::ComicConfig;
use crate::provider::GenerationProvider;
use comicbook_core::{ComicError, Result};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &ComicConfig) -> Result<Box<dyn GenerationProvider>> {
    if !config.is_enabled(name) {
        return Err(ComicError::ProviderError(format!(
            "Provider '{}' is disabled in config",
            name
        )));
    }
    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new(
            config.generation.max_panels,
        ))),
        "gemini" => Ok(Box::new(gemini::GeminiProvider::from_config(config)?)),
        _ => Err(ComicError::ProviderError(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "gemini"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_create_mock() {
        let provider = create_provider("mock", &ComicConfig::default()).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn test_unknown_provider() {
        let err = create_provider("dalle", &ComicConfig::default()).err().unwrap();
        assert!(err.to_string().contains("Available: mock, gemini"));
    }

    #[test]
    fn test_disabled_provider() {
        let mut config = ComicConfig::default();
        config.providers.insert(
            "mock".to_string(),
            ProviderConfig {
                enabled: Some(false),
                ..Default::default()
            },
        );
        assert!(create_provider("mock", &config).is_err());
    }

    #[test]
    fn test_gemini_without_key_reports_missing_key() {
        let err = create_provider("gemini", &ComicConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ComicError::ProviderError(_)));
        assert!(err.to_string().contains("API key not configured"));
    }
}
