//! Breakdown-only command: ask for panels, print them, render nothing

use super::{load_config, StoryInput};
use anyhow::{bail, Result};
use comicbook_gen::prompt::render_breakdown;
use comicbook_gen::providers::create_provider;
use comicbook_gen::{ComicPipeline, PipelineSettings};

pub struct BreakdownArgs {
    pub input: StoryInput,
    pub panels: Option<usize>,
    pub provider: Option<String>,
    pub format: String,
}

pub fn run(args: BreakdownArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        bail!("Unknown format '{}'; expected text or json", args.format);
    }

    let story = args.input.read()?;
    let config = load_config(args.provider, args.panels, None)?;
    let provider = create_provider(&config.generation.provider, &config)?;
    let pipeline = ComicPipeline::new(provider.as_ref(), PipelineSettings::from_config(&config));

    let panels = pipeline.breakdown(&story, config.generation.max_panels)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&panels)?);
    } else if panels.is_empty() {
        println!("No panels found in the model response.");
    } else {
        print!("{}", render_breakdown(&panels));
    }
    Ok(())
}
