use std::path::PathBuf;

use clap::Parser;

mod output;
mod run;

#[derive(Debug, Parser)]
#[command(name = "docdir")]
#[command(about = "Professional-directory crawler: listings, profiles, reviews, Q&A")]
struct Cli {
    /// Restrict the run to one configured city.
    city: Option<String>,

    /// Also write a consolidated file aggregating all processed cities.
    #[arg(long)]
    combined: bool,

    /// Path to the city → listing-URL map (overrides DOCDIR_CITIES_PATH).
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Directory for the per-city JSON output (overrides DOCDIR_OUTPUT_DIR).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = docdir_core::load_crawl_config()?;
    if let Some(path) = cli.cities {
        config.cities_path = path;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    // Fatal input: a missing or malformed cities map, or an unknown city
    // name, aborts before any crawl is attempted.
    let city_map = docdir_core::load_cities(&config.cities_path)?;
    let targets = docdir_core::targets_for(&city_map, cli.city.as_deref())?;

    run::crawl(&config, &targets, cli.combined).await
}
