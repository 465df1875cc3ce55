use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_intake::{catalog, config::Config, discover, ingest};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Load the catalog, merge every recipe file into it, and write it back.
fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut production = catalog::load_catalog(&config.catalog)?;

    let files = discover::load_recipe_files(&config.recipes_dir);
    let report = ingest::ingest(&mut production, files)?;

    // Nothing to write back when nothing changed in place.
    if report.injected_count() > 0 || config.output != config.catalog {
        catalog::save_catalog(&config.output, &production)?;
        info!(path = %config.output.display(), "catalog written");
    }
    Ok(())
}
