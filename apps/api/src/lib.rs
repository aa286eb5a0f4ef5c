pub mod config;
pub mod datasets;
pub mod errors;
pub mod evals;
pub mod llm_client;
pub mod logging;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod vectors;

pub use config::Config;
