//! Candidate scoring pipeline: format prompt → model call → schema-checked parse.
//! All model calls go through llm_client.

pub mod handlers;
pub mod prompts;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::models::ModelSpec;
use crate::llm_client::prompts::{fill_placeholder, JSON_ONLY_SYSTEM};
use crate::llm_client::{ChatBackend, ChatRequest, ResponseFormat};
use crate::models::candidate_scores::{candidate_scores_schema, CandidateScores, SCHEMA_NAME};
use prompts::CANDIDATE_SCORES_PROMPT_TEMPLATE;

/// Which model and prompt a scoring run uses.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub model: ModelSpec,
    pub prompt_template: &'static str,
}

impl ScoringContext {
    pub fn new(model: ModelSpec) -> Self {
        Self {
            model,
            prompt_template: CANDIDATE_SCORES_PROMPT_TEMPLATE,
        }
    }

    /// Pure: the same CV text always yields the same prompt.
    pub fn format_prompt(&self, cv_text: &str) -> String {
        fill_placeholder(self.prompt_template, "cv_text", cv_text)
    }

    /// Models without strict schema support get a JSON-only system prompt,
    /// since JSON-object mode alone does not pin the shape of the answer.
    pub fn request(&self, cv_text: &str) -> ChatRequest {
        let request = ChatRequest::new(self.model, self.format_prompt(cv_text)).with_response_format(
            ResponseFormat::structured(&self.model, SCHEMA_NAME, candidate_scores_schema()),
        );
        if self.model.strict_schema {
            request
        } else {
            request.with_system(JSON_ONLY_SYSTEM)
        }
    }
}

/// Scores a CV. Blank input is answered locally with the invalid result.
pub async fn score_candidate(
    llm: &dyn ChatBackend,
    context: &ScoringContext,
    cv_text: &str,
) -> Result<CandidateScores, AppError> {
    if cv_text.trim().is_empty() {
        info!("Empty CV text; returning invalid scores without a model call");
        return Ok(CandidateScores::invalid());
    }

    debug!(
        model = context.model.name,
        cv_chars = cv_text.chars().count(),
        "Scoring candidate"
    );

    let raw = llm
        .complete(&context.request(cv_text))
        .await
        .map_err(|e| AppError::Llm(format!("Candidate scoring failed: {e}")))?;

    let scores = CandidateScores::from_model_output(&raw)?;

    info!(
        valid = scores.valid,
        education = ?scores.education.final_score,
        experience = ?scores.experience.final_score,
        "Candidate scored"
    );

    Ok(scores)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::llm_client::models::{GPT_35_TURBO, GPT_4O};

    #[test]
    fn test_format_prompt_is_deterministic() {
        let context = ScoringContext::new(GPT_4O);
        assert_eq!(context.format_prompt(STRONG_CV), context.format_prompt(STRONG_CV));
    }

    #[test]
    fn test_format_prompt_wraps_cv_in_tags() {
        let prompt = ScoringContext::new(GPT_4O).format_prompt("Line one\nLine two");
        assert!(prompt.contains("<CV>\nLine one\nLine two\n</CV>"));
        assert!(!prompt.contains("{cv_text}"));
    }

    #[test]
    fn test_request_uses_strict_schema() {
        let request = ScoringContext::new(GPT_4O).request("cv");
        assert_eq!(request.model, GPT_4O);
        match request.response_format {
            ResponseFormat::JsonSchema { name, schema } => {
                assert_eq!(name, "CandidateScores");
                assert_eq!(schema, candidate_scores_schema());
            }
            other => panic!("unexpected format {other:?}"),
        }
    }

    #[test]
    fn test_request_json_mode_for_legacy_model() {
        let request = ScoringContext::new(GPT_35_TURBO).request("cv");
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
        assert_eq!(request.system.as_deref(), Some(JSON_ONLY_SYSTEM));
    }

    #[test]
    fn test_request_strict_model_has_no_system_prompt() {
        let request = ScoringContext::new(GPT_4O).request("cv");
        assert!(request.system.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_is_invalid_without_model_call() {
        let llm = StubBackend::replying(STRONG_CV_OUTPUT);
        let context = ScoringContext::new(GPT_4O);
        for input in ["", "   ", "\n\t"] {
            let scores = score_candidate(&llm, &context, input).await.unwrap();
            assert_eq!(scores, CandidateScores::invalid());
        }
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_strong_cv_scores_high() {
        let llm = StubBackend::replying(STRONG_CV_OUTPUT);
        let scores = score_candidate(&llm, &ScoringContext::new(GPT_4O), STRONG_CV)
            .await
            .unwrap();
        assert!(scores.valid);
        let education = scores.education.final_score.unwrap();
        let experience = scores.experience.final_score.unwrap();
        assert!((8.0..10.0).contains(&education));
        assert!((8.0..10.0).contains(&experience));

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains(STRONG_CV));
    }

    #[tokio::test]
    async fn test_model_invalid_verdict_passes_through() {
        let llm = StubBackend::replying(
            r#"{"valid": false, "education": {}, "experience": {}}"#,
        );
        let scores = score_candidate(&llm, &ScoringContext::new(GPT_4O), "lorem ipsum")
            .await
            .unwrap();
        assert_eq!(scores, CandidateScores::invalid());
    }

    #[tokio::test]
    async fn test_malformed_output_is_schema_error() {
        let llm = StubBackend::replying(r#"{"valid": true, "education": {"final_score": 7}}"#);
        let err = score_candidate(&llm, &ScoringContext::new(GPT_4O), STRONG_CV)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Schema(_)), "{err}");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_llm_error() {
        let llm = StubBackend::failing(503);
        let err = score_candidate(&llm, &ScoringContext::new(GPT_4O), STRONG_CV)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)), "{err}");
    }
}
