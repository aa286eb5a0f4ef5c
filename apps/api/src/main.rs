use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use candidates_api::config::Config;
use candidates_api::llm_client::LlmClient;
use candidates_api::logging::init_tracing;
use candidates_api::routes::build_router;
use candidates_api::scoring::ScoringContext;
use candidates_api::state::AppState;
use candidates_api::vectors::ChromaClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    info!("Starting Candidates API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.llm.openai_api_key.clone(),
        config.llm.openai_base_url.clone(),
        config.llm.timeout,
        config.llm.max_retries,
    )
    .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (model: {}, retries: {})",
        config.llm.scoring_model.name, config.llm.max_retries
    );

    let vectors = ChromaClient::new(&config.chroma).context("Failed to build Chroma client")?;
    info!(
        "Chroma client initialized (host: {}, database: {})",
        config.chroma.host, config.chroma.database
    );

    let state = AppState {
        llm: Arc::new(llm),
        vectors: Arc::new(vectors),
        scoring: ScoringContext::new(config.llm.scoring_model),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
