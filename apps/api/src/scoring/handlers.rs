//! Axum route handlers for the Candidates API.

use axum::{
    extract::{FromRequest, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::candidate_scores::CandidateScores;
use crate::scoring::score_candidate;
use crate::state::AppState;

#[derive(Debug, Deserialize, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct CvRequest {
    pub cv_text: String,
}

/// POST /candidates/candidate-scores
///
/// Generates education and experience scores with detailed analysis.
/// A CV the model judges invalid comes back as `valid=false`, not as an error.
pub async fn handle_candidate_scores(
    State(state): State<AppState>,
    request: CvRequest,
) -> Result<Json<CandidateScores>, AppError> {
    let scores = score_candidate(state.llm.as_ref(), &state.scoring, &request.cv_text).await?;
    Ok(Json(scores))
}
