pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers as candidates;
use crate::state::AppState;
use crate::vectors::handlers as vectors;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health::health_handler))
        .route(
            "/candidates/candidate-scores",
            post(candidates::handle_candidate_scores),
        )
        .route("/vectors/collections", get(vectors::handle_list_collections))
        .with_state(state)
}
