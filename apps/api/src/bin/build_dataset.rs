//! Dataset CLI: turn a directory of CV text files into evaluation examples.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use candidates_api::datasets::{create_cv_examples, Dataset};
use candidates_api::logging::init_tracing;

/// Build or extend the candidate CV dataset.
#[derive(Parser, Debug)]
#[command(name = "build-dataset")]
struct Args {
    /// Directory holding one `.txt` file per CV.
    #[arg(long, default_value = "data/cv")]
    cv_dir: PathBuf,

    /// Dataset file (JSON Lines); created if missing.
    #[arg(long, default_value = "datasets/candidate_cv.jsonl")]
    dataset: PathBuf,

    /// Keep only the first N CVs (default: all).
    #[arg(long)]
    limit: Option<usize>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut examples = create_cv_examples(&args.cv_dir)
        .with_context(|| format!("Failed to read CVs from {}", args.cv_dir.display()))?;
    if let Some(limit) = args.limit {
        examples.truncate(limit);
    }
    info!("Prepared {} CV examples", examples.len());

    let dataset = Dataset::open_or_create(&args.dataset)?;
    let added = dataset.add_new_examples(examples)?;

    println!(
        "Added {} new examples to {}",
        added.len(),
        dataset.path().display()
    );
    Ok(())
}
