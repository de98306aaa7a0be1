//! Comicbook Gen - story-to-comic generation pipeline
//!
//! Breaks a short story into panels with a text model, illustrates each panel
//! with an image model, and stitches the illustrations into one storybook
//! sheet. Providers are pluggable (Gemini, Mock) behind a blocking trait.

pub mod compositor;
pub mod config;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod render;

pub use compositor::{stitch, stitch_directory, Storybook};
pub use config::ComicConfig;
pub use parser::parse_panels;
pub use pipeline::{ComicPipeline, PipelineSettings, RunReport};
pub use provider::{
    ContentPart, GenerateRequest, GenerationProvider, Modality, ProviderStatus,
};
pub use render::PanelRenderer;
