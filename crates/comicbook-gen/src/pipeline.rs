//! Story-to-storybook pipeline
//!
//! One run: reset the output directory, ask the text model for a panel
//! breakdown, illustrate the panels one at a time in index order, and stitch
//! whatever rendered into `storybook.png`. A panel whose response carries no
//! image is dropped without a placeholder; any provider error aborts the run.

use crate::compositor::stitch;
use crate::config::ComicConfig;
use crate::output::{prepare_output_dir, save_panel, STORYBOOK_FILE};
use crate::parser::parse_panels;
use crate::prompt::{breakdown_request, illustration_request};
use crate::provider::{GenerateRequest, GenerationProvider};
use crate::render::PanelRenderer;
use comicbook_core::{ComicError, GridLayout, PanelSpec, Result};
use std::path::{Path, PathBuf};

/// Everything a run needs besides the provider
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub text_model: String,
    pub image_model: String,
    pub output_dir: PathBuf,
}

impl PipelineSettings {
    pub fn from_config(config: &ComicConfig) -> Self {
        Self {
            text_model: config.generation.text_model.clone(),
            image_model: config.generation.image_model.clone(),
            output_dir: PathBuf::from(&config.generation.output_dir),
        }
    }
}

/// Progress notifications emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    BreakdownRequested,
    BreakdownParsed { panels: usize },
    PanelStarted { index: usize, total: usize },
    PanelSaved { index: usize, path: PathBuf },
    PanelDropped { index: usize },
    Stitching { panels: usize },
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Panels parsed from the breakdown, after bounding
    pub panels: Vec<PanelSpec>,
    /// Indices of panels that rendered, in order
    pub rendered: Vec<usize>,
    /// Indices of panels whose response carried no image
    pub dropped: Vec<usize>,
    pub panel_paths: Vec<PathBuf>,
    pub storybook_path: PathBuf,
    pub layout: GridLayout,
}

/// Runs the pipeline against one provider and one output directory
pub struct ComicPipeline<'a> {
    provider: &'a dyn GenerationProvider,
    settings: PipelineSettings,
}

impl<'a> ComicPipeline<'a> {
    pub fn new(provider: &'a dyn GenerationProvider, settings: PipelineSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn output_dir(&self) -> &Path {
        &self.settings.output_dir
    }

    /// Request and parse the panel breakdown, bounded to `max_panels`.
    ///
    /// Touches nothing on disk.
    pub fn breakdown(&self, story: &str, max_panels: usize) -> Result<Vec<PanelSpec>> {
        validate(story, max_panels)?;

        let request = GenerateRequest::text(
            &self.settings.text_model,
            &breakdown_request(story, max_panels),
        );
        let raw = self.provider.generate_text(&request)?;
        let mut panels = parse_panels(&raw);

        if panels.len() > max_panels {
            tracing::warn!(
                parsed = panels.len(),
                max_panels,
                "Breakdown returned more panels than requested; keeping the first {}",
                max_panels
            );
            panels.truncate(max_panels);
        }
        Ok(panels)
    }

    /// Run the full pipeline
    pub fn run(&self, story: &str, max_panels: usize) -> Result<RunReport> {
        self.run_with_progress(story, max_panels, &mut |_: RunEvent| {})
    }

    /// Run the full pipeline, reporting progress through `on_event`
    pub fn run_with_progress(
        &self,
        story: &str,
        max_panels: usize,
        on_event: &mut dyn FnMut(RunEvent),
    ) -> Result<RunReport> {
        validate(story, max_panels)?;

        let output_dir = self.output_dir();
        tracing::info!(dir = %output_dir.display(), "Preparing output directory");
        prepare_output_dir(output_dir)?;

        tracing::info!(
            provider = self.provider.name(),
            model = %self.settings.text_model,
            max_panels,
            "Requesting panel breakdown"
        );
        on_event(RunEvent::BreakdownRequested);
        let panels = self.breakdown(story, max_panels)?;
        tracing::info!(panels = panels.len(), "Breakdown parsed");
        on_event(RunEvent::BreakdownParsed {
            panels: panels.len(),
        });

        let renderer = PanelRenderer::new(self.provider, &self.settings.image_model);
        let mut images = Vec::with_capacity(panels.len());
        let mut rendered = Vec::new();
        let mut dropped = Vec::new();
        let mut panel_paths = Vec::new();

        for panel in &panels {
            on_event(RunEvent::PanelStarted {
                index: panel.index,
                total: panels.len(),
            });
            if panel.scene_description.is_empty() {
                tracing::warn!(index = panel.index, "Panel has no scene description");
            }

            let prompt = illustration_request(&panel.scene_description, &panel.caption);
            match renderer.render(&prompt)? {
                Some(image) => {
                    let path = save_panel(output_dir, panel.index, &image)?;
                    tracing::info!(index = panel.index, path = %path.display(), "Panel saved");
                    on_event(RunEvent::PanelSaved {
                        index: panel.index,
                        path: path.clone(),
                    });
                    images.push(image);
                    rendered.push(panel.index);
                    panel_paths.push(path);
                }
                None => {
                    tracing::warn!(index = panel.index, "No image returned; dropping panel");
                    on_event(RunEvent::PanelDropped { index: panel.index });
                    dropped.push(panel.index);
                }
            }
        }

        if images.is_empty() {
            return Err(ComicError::NoPanelsGenerated);
        }
        on_event(RunEvent::Stitching {
            panels: images.len(),
        });
        let storybook = stitch(&images).ok_or(ComicError::NoPanelsGenerated)?;
        let storybook_path = output_dir.join(STORYBOOK_FILE);
        storybook.save(&storybook_path)?;
        tracing::info!(
            path = %storybook_path.display(),
            cols = storybook.layout.cols,
            rows = storybook.layout.rows,
            "Storybook saved"
        );

        Ok(RunReport {
            panels,
            rendered,
            dropped,
            panel_paths,
            storybook_path,
            layout: storybook.layout,
        })
    }
}

fn validate(story: &str, max_panels: usize) -> Result<()> {
    if story.trim().is_empty() {
        return Err(ComicError::EmptyStory);
    }
    ComicError::check_panel_count(max_panels)?;
    Ok(())
}
