//! Offline evaluation: run the scorer over a dataset and grade each output
//! with a judge model.

pub mod prompts;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::datasets::StoredExample;
use crate::llm_client::models::ModelSpec;
use crate::llm_client::prompts::fill_placeholders;
use crate::llm_client::{complete_json, ChatBackend, ChatRequest, LlmError, ResponseFormat};
use crate::models::candidate_scores::CandidateScores;
use crate::scoring::{score_candidate, ScoringContext};
use prompts::{CORRECTNESS_EVAL_PROMPT_TEMPLATE, CORRECTNESS_EVAL_SYSTEM};

pub const CORRECTNESS_KEY: &str = "correctness";

/// Allowed judge scores: 0.0, 0.1, …, 1.0.
pub fn score_choices() -> Vec<f64> {
    (0..=10).map(|n| n as f64 / 10.0).collect()
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("judge call failed: {0}")]
    Judge(#[from] LlmError),

    #[error("judge score {0} is outside [0.0, 1.0]")]
    ScoreOutOfRange(f64),
}

#[derive(Debug, Clone, Deserialize)]
struct JudgeVerdict {
    reasoning: String,
    score: f64,
}

fn judge_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reasoning": { "type": "string" },
            "score": { "type": "number", "enum": score_choices() }
        },
        "required": ["reasoning", "score"],
        "additionalProperties": false
    })
}

/// Snaps a judge score onto the nearest allowed choice.
pub fn snap_to_choice(score: f64) -> Result<f64, EvalError> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(EvalError::ScoreOutOfRange(score));
    }
    Ok((score * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub key: String,
    pub score: f64,
    pub comment: String,
}

/// Asks the judge model how correct `output` is for `cv_text`.
pub async fn judge_correctness(
    llm: &dyn ChatBackend,
    judge_model: ModelSpec,
    cv_text: &str,
    output: &CandidateScores,
) -> Result<Feedback, EvalError> {
    let inputs = json!({ "cv_text": cv_text }).to_string();
    let outputs = json!({ "result": output }).to_string();
    let prompt = fill_placeholders(
        CORRECTNESS_EVAL_PROMPT_TEMPLATE,
        &[("inputs", &inputs), ("outputs", &outputs)],
    );

    let request = ChatRequest::new(judge_model, prompt)
        .with_system(CORRECTNESS_EVAL_SYSTEM)
        .with_response_format(ResponseFormat::structured(
            &judge_model,
            "score",
            judge_schema(),
        ));

    let verdict: JudgeVerdict = complete_json(llm, &request).await?;

    Ok(Feedback {
        key: CORRECTNESS_KEY.to_string(),
        score: snap_to_choice(verdict.score)?,
        comment: verdict.reasoning,
    })
}

#[derive(Debug, Clone)]
pub struct EvalSettings {
    pub scoring: ScoringContext,
    pub judge_model: ModelSpec,
    pub experiment_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    pub model: String,
    pub eval_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleResult {
    pub example_id: Uuid,
    pub source_id: Option<String>,
    pub output: Option<CandidateScores>,
    pub feedback: Option<Feedback>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub experiment: String,
    pub started_at: DateTime<Utc>,
    pub metadata: ExperimentMetadata,
    pub results: Vec<ExampleResult>,
    /// Mean correctness over examples that produced feedback.
    pub mean_correctness: Option<f64>,
}

impl ExperimentReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Scores every example, then grades each output. A failing example is
/// recorded with its error and does not stop the run.
pub async fn run_evaluation(
    llm: &dyn ChatBackend,
    settings: &EvalSettings,
    examples: &[StoredExample],
) -> ExperimentReport {
    let experiment = format!("{}-{}", settings.experiment_prefix, Uuid::new_v4());
    let started_at = Utc::now();
    info!(
        "Starting experiment {experiment} over {} examples",
        examples.len()
    );

    let mut results = Vec::with_capacity(examples.len());
    for stored in examples {
        let cv_text = &stored.example.inputs.cv_text;
        let mut result = ExampleResult {
            example_id: stored.id,
            source_id: stored.example.metadata.id.clone(),
            output: None,
            feedback: None,
            error: None,
        };

        match score_candidate(llm, &settings.scoring, cv_text).await {
            Ok(output) => {
                match judge_correctness(llm, settings.judge_model, cv_text, &output).await {
                    Ok(feedback) => result.feedback = Some(feedback),
                    Err(e) => {
                        warn!("Judging example {} failed: {e}", stored.id);
                        result.error = Some(e.to_string());
                    }
                }
                result.output = Some(output);
            }
            Err(e) => {
                warn!("Scoring example {} failed: {e}", stored.id);
                result.error = Some(e.to_string());
            }
        }
        results.push(result);
    }

    let scores: Vec<f64> = results
        .iter()
        .filter_map(|r| r.feedback.as_ref().map(|f| f.score))
        .collect();
    let mean_correctness =
        (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);

    ExperimentReport {
        experiment,
        started_at,
        metadata: ExperimentMetadata {
            model: settings.scoring.model.name.to_string(),
            eval_model: settings.judge_model.name.to_string(),
        },
        results,
        mean_correctness,
    }
}
