//! Re-stitch saved panels without calling any model

use super::load_config;
use anyhow::{Context, Result};
use comicbook_gen::output::STORYBOOK_FILE;
use comicbook_gen::{stitch_directory, ComicConfig};
use std::path::{Path, PathBuf};

pub fn run(output_dir: Option<&str>, save_as: Option<&str>) -> Result<()> {
    let config = load_config(None, None, output_dir.map(str::to_string))?;
    restitch(&config, save_as)?;
    Ok(())
}

/// Stitch the panels in the configured output directory into its storybook
fn restitch(config: &ComicConfig, save_as: Option<&str>) -> Result<PathBuf> {
    let dir = Path::new(&config.generation.output_dir);
    let storybook = stitch_directory(dir)
        .with_context(|| format!("Failed to read panels from {}", dir.display()))?
        .ok_or_else(|| anyhow::anyhow!("No panel images found in {}", dir.display()))?;

    let path = dir.join(STORYBOOK_FILE);
    storybook.save(&path)?;
    println!(
        "Stitched {} panels ({}x{} grid) -> {}",
        storybook.layout.count,
        storybook.layout.cols,
        storybook.layout.rows,
        path.display()
    );

    if let Some(dest) = save_as {
        storybook.save(Path::new(dest))?;
        println!("  Saved copy: {}", dest);
    }
    Ok(path)
}
