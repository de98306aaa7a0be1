//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `COMICBOOK_GEMINI_API_KEY`, then `GOOGLE_API_KEY`
//! 2. Project-local: `.comicbook/config.toml`
//! 3. Global: `~/.comicbook/config.toml`

use comicbook_core::{ComicError, Result, MAX_PANELS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_panels";

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Unset means enabled
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub provider: String,
    pub text_model: String,
    pub image_model: String,
    pub max_panels: usize,
    pub output_dir: String,
}

/// `[generation]` as written in one config file; unset keys defer to lower layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationLayer {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub text_model: Option<String>,
    #[serde(default)]
    pub image_model: Option<String>,
    #[serde(default)]
    pub max_panels: Option<usize>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl GenerationLayer {
    fn apply_to(self, generation: &mut GenerationConfig) {
        if let Some(provider) = self.provider {
            generation.provider = provider;
        }
        if let Some(text_model) = self.text_model {
            generation.text_model = text_model;
        }
        if let Some(image_model) = self.image_model {
            generation.image_model = image_model;
        }
        if let Some(max_panels) = self.max_panels {
            generation.max_panels = max_panels;
        }
        if let Some(output_dir) = self.output_dir {
            generation.output_dir = output_dir;
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            max_panels: default_max_panels(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}
fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}
fn default_max_panels() -> usize {
    MAX_PANELS
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComicConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationLayer,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct ComicConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl ComicConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = ComicConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".comicbook/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config);
        Self::resolve(config)
    }

    /// Load config from a specific file path only (env overrides still apply)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Self::resolve(config)
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL override for a provider
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Get request timeout override for a provider
    pub fn timeout_secs(&self, provider_name: &str) -> Option<u64> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.timeout_secs)
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    fn resolve(config: ComicConfigFile) -> Result<Self> {
        let mut generation = GenerationConfig::default();
        config.generation.apply_to(&mut generation);
        ComicError::check_panel_count(generation.max_panels).map_err(|e| {
            ComicError::ConfigError(format!("generation.max_panels: {}", e))
        })?;
        Ok(ComicConfig {
            providers: config.providers,
            generation,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".comicbook").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ComicConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: ComicConfigFile = toml::from_str(&content).map_err(|e| {
            ComicError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut ComicConfigFile, overlay: ComicConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.timeout_secs.is_some() {
                entry.timeout_secs = provider.timeout_secs;
            }
            if provider.enabled.is_some() {
                entry.enabled = provider.enabled;
            }
        }

        let generation = overlay.generation;
        let base_gen = &mut base.generation;
        if generation.provider.is_some() {
            base_gen.provider = generation.provider;
        }
        if generation.text_model.is_some() {
            base_gen.text_model = generation.text_model;
        }
        if generation.image_model.is_some() {
            base_gen.image_model = generation.image_model;
        }
        if generation.max_panels.is_some() {
            base_gen.max_panels = generation.max_panels;
        }
        if generation.output_dir.is_some() {
            base_gen.output_dir = generation.output_dir;
        }
    }

    fn apply_env_overrides(config: &mut ComicConfigFile) {
        let key = std::env::var("COMICBOOK_GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"));
        if let Ok(key) = key {
            let entry = config.providers.entry("gemini".to_string()).or_default();
            entry.api_key = Some(key);
        }
    }
}
