//! Comicbook Core - Foundational types for the comicbook pipeline
//!
//! This crate provides the types that the generation pipeline and CLI share:
//! - `PanelSpec` - One parsed scene/caption pair
//! - `GridLayout` - The near-square storybook grid law
//! - Error types and Result alias

mod error;
mod grid;
mod panel;

pub use error::{ComicError, Result, MAX_PANELS};
pub use grid::GridLayout;
pub use panel::{panel_file_name, parse_panel_file_name, PanelSpec};
