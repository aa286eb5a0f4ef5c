//! Evaluation CLI: score every dataset example and grade it with a judge model.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use candidates_api::datasets::Dataset;
use candidates_api::evals::{run_evaluation, EvalSettings};
use candidates_api::llm_client::LlmClient;
use candidates_api::logging::init_tracing;
use candidates_api::scoring::ScoringContext;
use candidates_api::config::LlmConfig;

/// Evaluate candidate scoring against a judge model.
#[derive(Parser, Debug)]
#[command(name = "eval")]
struct Args {
    /// Dataset file produced by `build-dataset`.
    #[arg(long, default_value = "datasets/candidate_cv.jsonl")]
    dataset: PathBuf,

    /// Write the full report as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Experiment name prefix.
    #[arg(long, default_value = "dev")]
    prefix: String,

    /// Log level when RUST_LOG is not set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Only the model-provider settings are needed offline.
    let config = LlmConfig::from_env()?;
    let args = Args::parse();
    init_tracing(&args.log_level);

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.timeout,
        config.max_retries,
    )
    .context("Failed to build LLM client")?;

    if !args.dataset.exists() {
        bail!("Dataset {} does not exist; run build-dataset first", args.dataset.display());
    }
    let examples = Dataset::open_or_create(&args.dataset)?.examples()?;
    if examples.is_empty() {
        bail!("No examples in {}", args.dataset.display());
    }

    println!(
        "Running evaluation on {} examples (model: {}, judge: {})\n",
        examples.len(),
        config.scoring_model.name,
        config.judge_model.name
    );

    let settings = EvalSettings {
        scoring: ScoringContext::new(config.scoring_model),
        judge_model: config.judge_model,
        experiment_prefix: args.prefix,
    };
    let report = run_evaluation(&llm, &settings, &examples).await;

    for result in &report.results {
        let id = result.source_id.as_deref().unwrap_or("-");
        match (&result.feedback, &result.error) {
            (Some(feedback), _) => println!("  {id}: correctness={:.1}", feedback.score),
            (None, Some(error)) => println!("  {id}: FAILED ({error})"),
            (None, None) => println!("  {id}: no feedback"),
        }
    }

    println!("\nExperiment: {}", report.experiment);
    match report.mean_correctness {
        Some(mean) => println!("Mean correctness: {mean:.3}"),
        None => println!("Mean correctness: n/a"),
    }
    println!("Failures: {}/{}", report.failures(), report.results.len());

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
