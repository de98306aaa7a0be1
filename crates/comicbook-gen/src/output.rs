//! Flat output directory for one run
//!
//! Holds `panel_<index>.png` for every rendered panel plus `storybook.png`.
//! The directory is emptied at the start of each run.

use comicbook_core::{panel_file_name, parse_panel_file_name, ComicError, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// File name of the composite sheet
pub const STORYBOOK_FILE: &str = "storybook.png";

/// Create `dir`, or delete everything inside it if it already exists
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Save a panel image as `panel_<index>.png` inside `dir`
pub fn save_panel(dir: &Path, index: usize, image: &DynamicImage) -> Result<PathBuf> {
    let path = dir.join(panel_file_name(index));
    image.save(&path).map_err(|e| {
        ComicError::ImageError(format!("Failed to save panel {}: {}", index, e))
    })?;
    Ok(path)
}

/// Panel files in `dir`, sorted by ascending index
pub fn list_panel_files(dir: &Path) -> Result<Vec<(usize, PathBuf)>> {
    let mut panels = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(index) = name.to_str().and_then(parse_panel_file_name) {
            panels.push((index, entry.path()));
        }
    }
    panels.sort_by_key(|(index, _)| *index);
    Ok(panels)
}
