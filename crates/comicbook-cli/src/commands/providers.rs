//! Provider listing

use anyhow::Result;
use comicbook_gen::providers::{available_providers, create_provider};
use comicbook_gen::ComicConfig;

pub fn run() -> Result<()> {
    let config = ComicConfig::load()?;
    println!("Providers (default: {}):", config.generation.provider);
    for name in available_providers() {
        let status = match create_provider(name, &config) {
            Ok(provider) => match provider.health_check() {
                Ok(status) => status.to_string(),
                Err(e) => format!("error ({})", e),
            },
            Err(e) => format!("unavailable ({})", e),
        };
        println!("  {:<8} {}", name, status);
    }
    Ok(())
}
