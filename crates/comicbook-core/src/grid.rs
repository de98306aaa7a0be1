//! Storybook grid layout
//!
//! The grid is a pure function of the panel count: `cols = floor(sqrt(n))`,
//! `rows = ceil(n / cols)`, filled row-major. Trailing cells stay empty.

use serde::{Deserialize, Serialize};

/// Placement of `count` equal-sized cells on a near-square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub count: usize,
    pub cols: usize,
    pub rows: usize,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridLayout {
    /// Compute the layout for `count` cells of `cell_width` x `cell_height`.
    ///
    /// Returns `None` when `count` is zero.
    pub fn for_count(count: usize, cell_width: u32, cell_height: u32) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let cols = isqrt(count);
        let rows = count.div_ceil(cols);
        Some(Self {
            count,
            cols,
            rows,
            cell_width,
            cell_height,
        })
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.cols as u32 * self.cell_width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.rows as u32 * self.cell_height
    }

    /// Grid cell `(row, col)` for the cell at `idx` (0-based)
    pub fn cell(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    /// Pixel offset of the top-left corner of cell `idx`
    pub fn cell_origin(&self, idx: usize) -> (u32, u32) {
        let (row, col) = self.cell(idx);
        (col as u32 * self.cell_width, row as u32 * self.cell_height)
    }

    /// Number of cells left empty after the last panel
    pub fn empty_cells(&self) -> usize {
        self.cols * self.rows - self.count
    }
}

/// Integer square root, rounded down
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // Correct any float rounding at perfect-square boundaries
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
