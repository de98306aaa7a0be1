//! Storybook compositing
//!
//! Pastes rendered panels row-major onto a white canvas laid out by
//! [`GridLayout`]. All panels are expected to share the first panel's size.

use crate::output::list_panel_files;
use comicbook_core::{ComicError, GridLayout, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// Canvas color for cells without a panel
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// A composited storybook sheet
#[derive(Debug, Clone)]
pub struct Storybook {
    pub image: RgbImage,
    pub layout: GridLayout,
}

impl Storybook {
    /// Save the sheet; the format follows the file extension
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path).map_err(|e| {
            ComicError::ImageError(format!("Failed to save {}: {}", path.display(), e))
        })
    }
}

/// Stitch images into a near-square grid.
///
/// Returns `None` for an empty slice.
pub fn stitch(images: &[DynamicImage]) -> Option<Storybook> {
    let first = images.first()?;
    let layout = GridLayout::for_count(images.len(), first.width(), first.height())?;

    let mut canvas = RgbImage::from_pixel(layout.width(), layout.height(), BACKGROUND);
    for (idx, img) in images.iter().enumerate() {
        let (x, y) = layout.cell_origin(idx);
        image::imageops::replace(&mut canvas, &img.to_rgb8(), x as i64, y as i64);
    }

    Some(Storybook {
        image: canvas,
        layout,
    })
}

/// Re-stitch the `panel_<n>.png` files of an earlier run in index order
pub fn stitch_directory(dir: &Path) -> Result<Option<Storybook>> {
    let mut images = Vec::new();
    for (index, path) in list_panel_files(dir)? {
        let img = image::open(&path).map_err(|e| {
            ComicError::ImageError(format!("Failed to load panel {}: {}", index, e))
        })?;
        images.push(img);
    }
    Ok(stitch(&images))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb([value, 0, 0])))
    }

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "comicbook_compositor_test_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_input_has_no_storybook() {
        assert!(stitch(&[]).is_none());
    }

    #[test]
    fn test_single_panel() {
        let book = stitch(&[solid(16, 7)]).unwrap();
        assert_eq!(book.image.dimensions(), (16, 16));
        assert_eq!((book.layout.cols, book.layout.rows), (1, 1));
    }

    #[test]
    fn test_nine_panels_fill_grid() {
        let images: Vec<DynamicImage> = (0..9).map(|i| solid(512, i as u8 + 1)).collect();
        let book = stitch(&images).unwrap();
        assert_eq!(book.image.dimensions(), (1536, 1536));
        assert_eq!((book.layout.cols, book.layout.rows), (3, 3));

        for idx in 0..9 {
            let (x, y) = book.layout.cell_origin(idx);
            assert_eq!(book.image.get_pixel(x + 10, y + 10).0, [idx as u8 + 1, 0, 0]);
        }
    }

    #[test]
    fn test_five_panels_leave_background_cell() {
        let images: Vec<DynamicImage> = (0..5).map(|i| solid(256, i as u8 + 1)).collect();
        let book = stitch(&images).unwrap();
        assert_eq!(book.image.dimensions(), (512, 768));
        assert_eq!((book.layout.cols, book.layout.rows), (2, 3));

        // Fifth panel lands bottom-left
        assert_eq!(book.image.get_pixel(0, 512).0, [5, 0, 0]);
        // Sixth cell stays white
        assert_eq!(book.image.get_pixel(256, 512).0, [255, 255, 255]);
        assert_eq!(book.image.get_pixel(511, 767).0, [255, 255, 255]);
    }

    #[test]
    fn test_placement_law_row_major() {
        let images: Vec<DynamicImage> = (0..7).map(|i| solid(10, i as u8 + 1)).collect();
        let book = stitch(&images).unwrap();
        let cols = book.layout.cols as u32;
        for idx in 0..7u32 {
            let x = (idx % cols) * 10;
            let y = (idx / cols) * 10;
            assert_eq!(book.image.get_pixel(x, y).0, [idx as u8 + 1, 0, 0]);
            assert_eq!(book.image.get_pixel(x + 9, y + 9).0, [idx as u8 + 1, 0, 0]);
        }
    }

    #[test]
    fn test_stitch_is_reproducible() {
        let images: Vec<DynamicImage> = (0..4).map(|i| solid(8, i as u8 * 40)).collect();
        let a = stitch(&images).unwrap();
        let b = stitch(&images).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test]
    fn test_stitch_directory_orders_by_index() {
        let dir = temp_dir();
        // Written out of order, with a gap and an unrelated file
        solid(8, 30).save(dir.join("panel_3.png")).unwrap();
        solid(8, 10).save(dir.join("panel_1.png")).unwrap();
        solid(8, 99).save(dir.join("storybook.png")).unwrap();

        let book = stitch_directory(&dir).unwrap().unwrap();
        assert_eq!(book.layout.count, 2);
        assert_eq!(book.image.dimensions(), (8, 16));
        assert_eq!(book.image.get_pixel(0, 0).0, [10, 0, 0]);
        assert_eq!(book.image.get_pixel(0, 8).0, [30, 0, 0]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_stitch_empty_directory() {
        let dir = temp_dir();
        assert!(stitch_directory(&dir).unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
