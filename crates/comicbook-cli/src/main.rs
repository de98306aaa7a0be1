//! Comicbook CLI - turn a short story into an illustrated storybook sheet

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{breakdown, generate, providers, stitch};

#[derive(Parser)]
#[command(name = "comicbook")]
#[command(about = "Turn a short story into a grid of illustrated comic panels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate panels and a stitched storybook from a story
    Generate {
        #[command(flatten)]
        input: commands::StoryInput,

        /// Maximum number of panels (1-9)
        #[arg(long, short, value_parser = parse_panel_count)]
        panels: Option<usize>,

        /// Provider to use (gemini, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Output directory (cleared before the run)
        #[arg(long)]
        output_dir: Option<String>,

        /// Also copy the finished storybook to this path
        #[arg(long)]
        save_as: Option<String>,
    },

    /// Show the panel breakdown for a story without rendering images
    Breakdown {
        #[command(flatten)]
        input: commands::StoryInput,

        /// Maximum number of panels (1-9)
        #[arg(long, short, value_parser = parse_panel_count)]
        panels: Option<usize>,

        /// Provider to use (gemini, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Re-stitch the panel images already in an output directory
    Stitch {
        /// Directory holding panel_<n>.png files (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<String>,

        /// Also copy the storybook to this path
        #[arg(long)]
        save_as: Option<String>,
    },

    /// List providers and their status
    Providers,
}

fn parse_panel_count(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|e| format!("invalid panel count: {}", e))?;
    comicbook_core::ComicError::check_panel_count(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            panels,
            provider,
            output_dir,
            save_as,
        } => generate::run(generate::GenerateArgs {
            input,
            panels,
            provider,
            output_dir,
            save_as,
        }),
        Commands::Breakdown {
            input,
            panels,
            provider,
            format,
        } => breakdown::run(breakdown::BreakdownArgs {
            input,
            panels,
            provider,
            format,
        }),
        Commands::Stitch {
            output_dir,
            save_as,
        } => stitch::run(output_dir.as_deref(), save_as.as_deref()),
        Commands::Providers => providers::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_panel_count() {
        assert_eq!(parse_panel_count("4"), Ok(4));
        assert!(parse_panel_count("0").is_err());
        assert!(parse_panel_count("10").is_err());
        assert!(parse_panel_count("many").is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "comicbook",
            "generate",
            "A frog sings.",
            "--panels",
            "3",
            "--provider",
            "mock",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                input,
                panels,
                provider,
                ..
            } => {
                assert_eq!(input.story.as_deref(), Some("A frog sings."));
                assert_eq!(panels, Some(3));
                assert_eq!(provider.as_deref(), Some("mock"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_too_many_panels() {
        assert!(Cli::try_parse_from(["comicbook", "generate", "story", "--panels", "12"]).is_err());
    }
}
