//! Full story-to-storybook run

use super::{load_config, StoryInput};
use anyhow::{Context, Result};
use comicbook_gen::pipeline::RunEvent;
use comicbook_gen::providers::create_provider;
use comicbook_gen::{ComicPipeline, PipelineSettings};

pub struct GenerateArgs {
    pub input: StoryInput,
    pub panels: Option<usize>,
    pub provider: Option<String>,
    pub output_dir: Option<String>,
    pub save_as: Option<String>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let story = args.input.read()?;
    tracing::debug!(story_chars = story.len(), "Story loaded");
    let config = load_config(args.provider, args.panels, args.output_dir)?;
    let max_panels = config.generation.max_panels;
    let provider_name = config.generation.provider.clone();

    let provider = create_provider(&provider_name, &config)?;
    let pipeline = ComicPipeline::new(provider.as_ref(), PipelineSettings::from_config(&config));

    println!(
        "Generating up to {} panels via {} into {}",
        max_panels,
        provider_name,
        pipeline.output_dir().display()
    );

    let report =
        pipeline.run_with_progress(&story, max_panels, &mut |e: RunEvent| print_event(e))?;

    println!(
        "Storybook: {} ({} panels, {}x{} grid)",
        report.storybook_path.display(),
        report.rendered.len(),
        report.layout.cols,
        report.layout.rows
    );
    if !report.dropped.is_empty() {
        let dropped: Vec<String> = report.dropped.iter().map(|i| i.to_string()).collect();
        println!("  Skipped panels without an image: {}", dropped.join(", "));
    }

    if let Some(dest) = args.save_as {
        std::fs::copy(&report.storybook_path, &dest)
            .with_context(|| format!("Failed to copy storybook to {}", dest))?;
        println!("  Saved copy: {}", dest);
    }

    println!("Done!");
    Ok(())
}

fn print_event(event: RunEvent) {
    match event {
        RunEvent::BreakdownRequested => println!("Analyzing story and generating prompts..."),
        RunEvent::BreakdownParsed { panels } => println!("  {} panels in breakdown", panels),
        RunEvent::PanelStarted { index, total } => {
            println!("Generating panel {} of {}...", index, total)
        }
        RunEvent::PanelSaved { path, .. } => println!("  Saved: {}", path.display()),
        RunEvent::PanelDropped { index } => println!("  Panel {}: no image returned, skipped", index),
        RunEvent::Stitching { panels } => {
            println!("Stitching {} panels into a storybook...", panels)
        }
    }
}
