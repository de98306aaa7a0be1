//! CLI command implementations

pub mod breakdown;
pub mod generate;
pub mod providers;
pub mod stitch;

use anyhow::{bail, Context, Result};
use clap::Args;
use comicbook_gen::ComicConfig;
use std::io::Read;

/// Where the story text comes from
#[derive(Args, Debug, Clone)]
pub struct StoryInput {
    /// Story text (reads stdin when neither this nor --file is given)
    pub story: Option<String>,

    /// Read the story from a file
    #[arg(long, short, conflicts_with = "story")]
    pub file: Option<String>,
}

impl StoryInput {
    pub fn read(&self) -> Result<String> {
        if let Some(ref story) = self.story {
            return Ok(story.clone());
        }
        if let Some(ref path) = self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read story file {}", path));
        }
        let mut story = String::new();
        std::io::stdin()
            .read_to_string(&mut story)
            .context("Failed to read story from stdin")?;
        Ok(story)
    }
}

/// Load layered config and apply command-line overrides
pub fn load_config(
    provider: Option<String>,
    panels: Option<usize>,
    output_dir: Option<String>,
) -> Result<ComicConfig> {
    let mut config = ComicConfig::load().context("Failed to load config")?;
    if let Some(provider) = provider {
        config.generation.provider = provider;
    }
    if let Some(panels) = panels {
        config.generation.max_panels = panels;
    }
    if let Some(dir) = output_dir {
        config.generation.output_dir = dir;
    }
    if config.generation.output_dir.trim().is_empty() {
        bail!("Output directory must not be empty");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_from_argument() {
        let input = StoryInput {
            story: Some("Once upon a time".to_string()),
            file: None,
        };
        assert_eq!(input.read().unwrap(), "Once upon a time");
    }

    #[test]
    fn test_story_from_file() {
        let path = std::env::temp_dir().join(format!("comicbook_story_{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "A whale learns to whistle.").unwrap();
        let input = StoryInput {
            story: None,
            file: Some(path.to_string_lossy().to_string()),
        };
        assert_eq!(input.read().unwrap(), "A whale learns to whistle.");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_story_file() {
        let input = StoryInput {
            story: None,
            file: Some("/nonexistent/comicbook/story.txt".to_string()),
        };
        assert!(input.read().is_err());
    }
}
