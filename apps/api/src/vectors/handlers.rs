use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::vectors::Collection;

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<Collection>,
}

/// GET /vectors/collections
pub async fn handle_list_collections(
    State(state): State<AppState>,
) -> Result<Json<CollectionsResponse>, AppError> {
    let collections = state.vectors.list_collections().await?;
    Ok(Json(CollectionsResponse { collections }))
}
