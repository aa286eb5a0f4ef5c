//! Candidate score schema: the structured shape the model must answer in.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::llm_client::strip_json_fences;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Schema name sent with the structured-output request.
pub const SCHEMA_NAME: &str = "CandidateScores";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("model output does not match the CandidateScores schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{category}.final_score {score} is outside [0.0, 10.0]")]
    OutOfRange { category: &'static str, score: f64 },
}

/// Education or experience analysis. Every field is null when the input
/// was judged not to be a CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCategory {
    #[serde(default)]
    pub positive_factors: Option<String>,
    #[serde(default)]
    pub negative_factors: Option<String>,
    #[serde(default)]
    pub potential_improvements: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    /// 0.0 (poor) – 10.0 (excellent)
    #[serde(default)]
    pub final_score: Option<f64>,
}

impl ScoreCategory {
    pub fn is_empty(&self) -> bool {
        self == &ScoreCategory::default()
    }

    fn check_bounds(&self, category: &'static str) -> Result<(), ScoreError> {
        match self.final_score {
            Some(score) if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) => {
                Err(ScoreError::OutOfRange { category, score })
            }
            _ => Ok(()),
        }
    }
}

/// Education and experience scores for one CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScores {
    pub valid: bool,
    pub education: ScoreCategory,
    pub experience: ScoreCategory,
}

impl CandidateScores {
    /// The result for text that is not a CV: `valid=false`, everything null.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            education: ScoreCategory::default(),
            experience: ScoreCategory::default(),
        }
    }

    /// Parses and validates raw model output.
    ///
    /// Missing `valid`/`education`/`experience` or an out-of-range score is an
    /// error. A `valid=false` answer that still carries analysis is cleared so
    /// the all-null invariant holds.
    pub fn from_model_output(raw: &str) -> Result<Self, ScoreError> {
        let scores: CandidateScores = serde_json::from_str(strip_json_fences(raw))?;
        scores.validate()
    }

    pub fn validate(self) -> Result<Self, ScoreError> {
        self.education.check_bounds("education")?;
        self.experience.check_bounds("experience")?;

        if !self.valid && !(self.education.is_empty() && self.experience.is_empty()) {
            warn!("Model marked CV invalid but returned analysis; clearing category fields");
            return Ok(Self::invalid());
        }

        Ok(self)
    }
}

fn category_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "positive_factors": { "type": ["string", "null"] },
            "negative_factors": { "type": ["string", "null"] },
            "potential_improvements": { "type": ["string", "null"] },
            "reasoning": { "type": ["string", "null"] },
            "final_score": {
                "type": ["number", "null"],
                "minimum": MIN_SCORE,
                "maximum": MAX_SCORE
            }
        },
        "required": [
            "positive_factors",
            "negative_factors",
            "potential_improvements",
            "reasoning",
            "final_score"
        ],
        "additionalProperties": false
    })
}

/// JSON schema for `CandidateScores`, in the strict structured-output dialect
/// (every property required, optional values expressed as nullable types).
pub fn candidate_scores_schema() -> Value {
    json!({
        "type": "object",
        "description": "Candidate scores with education and experience evaluation",
        "properties": {
            "valid": { "type": "boolean" },
            "education": category_schema("Education score analysis and evaluation"),
            "experience": category_schema("Experience score analysis and evaluation")
        },
        "required": ["valid", "education", "experience"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_OUTPUT: &str = r#"{
        "valid": true,
        "education": {
            "positive_factors": "PhD in Computer Science from MIT",
            "negative_factors": null,
            "potential_improvements": null,
            "reasoning": "Top-tier doctorate with publications",
            "final_score": 9.4
        },
        "experience": {
            "positive_factors": "8 years at Google, promoted to manager",
            "negative_factors": "Single employer",
            "potential_improvements": "Broader industry exposure",
            "reasoning": "Strong progression and leadership",
            "final_score": 9.1
        }
    }"#;

    const INVALID_OUTPUT: &str = r#"{
        "valid": false,
        "education": {
            "positive_factors": null,
            "negative_factors": null,
            "potential_improvements": null,
            "reasoning": null,
            "final_score": null
        },
        "experience": {
            "positive_factors": null,
            "negative_factors": null,
            "potential_improvements": null,
            "reasoning": null,
            "final_score": null
        }
    }"#;

    #[test]
    fn test_parse_valid_output() {
        let scores = CandidateScores::from_model_output(VALID_OUTPUT).unwrap();
        assert!(scores.valid);
        assert_eq!(scores.education.final_score, Some(9.4));
        assert_eq!(scores.experience.final_score, Some(9.1));
        assert_eq!(scores.education.negative_factors, None);
        assert_eq!(
            scores.experience.negative_factors.as_deref(),
            Some("Single employer")
        );
    }

    #[test]
    fn test_parse_invalid_output_is_all_null() {
        let scores = CandidateScores::from_model_output(INVALID_OUTPUT).unwrap();
        assert_eq!(scores, CandidateScores::invalid());
        assert!(scores.education.is_empty());
        assert!(scores.experience.is_empty());
    }

    #[test]
    fn test_parse_fenced_output() {
        let fenced = format!("```json\n{VALID_OUTPUT}\n```");
        assert!(CandidateScores::from_model_output(&fenced).unwrap().valid);
    }

    #[test]
    fn test_missing_category_fields_default_to_null() {
        let raw = r#"{"valid": true, "education": {"final_score": 4.0}, "experience": {}}"#;
        let scores = CandidateScores::from_model_output(raw).unwrap();
        assert_eq!(scores.education.final_score, Some(4.0));
        assert_eq!(scores.education.reasoning, None);
        assert!(scores.experience.is_empty());
    }

    #[test]
    fn test_missing_valid_flag_rejected() {
        let raw = r#"{"education": {}, "experience": {}}"#;
        assert!(matches!(
            CandidateScores::from_model_output(raw),
            Err(ScoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_category_rejected() {
        let raw = r#"{"valid": true, "education": {"final_score": 5.0}}"#;
        assert!(matches!(
            CandidateScores::from_model_output(raw),
            Err(ScoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_null_category_rejected() {
        let raw = r#"{"valid": false, "education": null, "experience": null}"#;
        assert!(CandidateScores::from_model_output(raw).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let raw = r#"{"valid": "yes", "education": {}, "experience": {}}"#;
        assert!(CandidateScores::from_model_output(raw).is_err());
        let raw = r#"{"valid": true, "education": {"final_score": "9"}, "experience": {}}"#;
        assert!(CandidateScores::from_model_output(raw).is_err());
    }

    #[test]
    fn test_score_above_ten_rejected() {
        let raw = r#"{"valid": true, "education": {"final_score": 10.5}, "experience": {"final_score": 3}}"#;
        match CandidateScores::from_model_output(raw) {
            Err(ScoreError::OutOfRange { category, score }) => {
                assert_eq!(category, "education");
                assert!((score - 10.5).abs() < f64::EPSILON);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_score_rejected() {
        let raw = r#"{"valid": true, "education": {"final_score": 2}, "experience": {"final_score": -0.1}}"#;
        assert!(matches!(
            CandidateScores::from_model_output(raw),
            Err(ScoreError::OutOfRange { category: "experience", .. })
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let raw = r#"{"valid": true, "education": {"final_score": 0.0}, "experience": {"final_score": 10.0}}"#;
        let scores = CandidateScores::from_model_output(raw).unwrap();
        assert_eq!(scores.education.final_score, Some(0.0));
        assert_eq!(scores.experience.final_score, Some(10.0));
    }

    #[test]
    fn test_invalid_with_analysis_is_cleared() {
        let raw = r#"{
            "valid": false,
            "education": {"reasoning": "not a CV", "final_score": 0.0},
            "experience": {}
        }"#;
        let scores = CandidateScores::from_model_output(raw).unwrap();
        assert_eq!(scores, CandidateScores::invalid());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let scores = CandidateScores {
            valid: true,
            education: ScoreCategory {
                final_score: Some(f64::NAN),
                ..Default::default()
            },
            experience: ScoreCategory::default(),
        };
        assert!(scores.validate().is_err());
    }

    #[test]
    fn test_invalid_serializes_with_explicit_nulls() {
        let value = serde_json::to_value(CandidateScores::invalid()).unwrap();
        assert_eq!(value["valid"], false);
        for category in ["education", "experience"] {
            let fields = value[category].as_object().unwrap();
            assert_eq!(fields.len(), 5);
            assert!(fields.values().all(Value::is_null));
        }
    }

    #[test]
    fn test_schema_requires_every_property() {
        let schema = candidate_scores_schema();
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["valid", "education", "experience"]));
        for category in ["education", "experience"] {
            let sub = &schema["properties"][category];
            let props = sub["properties"].as_object().unwrap();
            let required: Vec<&str> = sub["required"]
                .as_array()
                .unwrap()
                .iter()
                .filter_map(Value::as_str)
                .collect();
            assert_eq!(props.len(), required.len());
            assert!(props.keys().all(|k| required.contains(&k.as_str())));
            assert_eq!(sub["properties"]["final_score"]["maximum"], 10.0);
        }
    }
}
