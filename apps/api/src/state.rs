use std::sync::Arc;

use crate::llm_client::ChatBackend;
use crate::scoring::ScoringContext;
use crate::vectors::VectorStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ChatBackend>,
    /// Built once at startup; handlers never construct their own client.
    pub vectors: Arc<dyn VectorStore>,
    pub scoring: ScoringContext,
}
