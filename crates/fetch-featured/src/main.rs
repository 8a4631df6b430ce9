use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{Config, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch-featured")]
#[command(about = "Build a JSON dataset of short Wikipedia Featured Article summaries")]
struct Args {
    /// Where to write the JSON dataset
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of shuffled titles to look up
    #[arg(short, long)]
    sample_size: Option<usize>,

    /// Seed for the shuffle, for reproducible samples
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = Config::from_env()?;
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(sample_size) = args.sample_size {
        config.sample_size = sample_size;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("📚 Fetching Featured Articles from {}", config.listing_url);
    let mut pipeline = Pipeline::new(config, rng)?;
    let summary = pipeline.run().await?;

    println!(
        "\n✅ Saved {} records to {} ({} sampled from {} titles, {} skipped)",
        summary.records.len(),
        summary.output_path.display(),
        summary.sampled,
        summary.candidates,
        summary.skipped.len()
    );

    Ok(())
}
