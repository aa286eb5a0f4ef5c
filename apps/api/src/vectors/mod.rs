//! Chroma vector-database client.
//!
//! Built once at startup from `ChromaConfig` and shared through `AppState`.

pub mod handlers;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ChromaConfig;

const CHROMA_TOKEN_HEADER: &str = "x-chroma-token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum VectorDbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A collection as exposed to callers: name and id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub id: String,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn list_collections(&self) -> Result<Vec<Collection>, VectorDbError>;
}

#[derive(Clone)]
pub struct ChromaClient {
    client: Client,
    base_url: String,
    tenant: String,
    database: String,
    token: String,
}

impl ChromaClient {
    pub fn new(config: &ChromaConfig) -> Result<Self, VectorDbError> {
        let scheme = if config.ssl { "https" } else { "http" };
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: format!("{scheme}://{}", config.host.trim_end_matches('/')),
            tenant: config.tenant.clone(),
            database: config.database.clone(),
            token: config.token.clone(),
        })
    }

    fn collections_url(&self) -> String {
        format!(
            "{}/api/v2/tenants/{}/databases/{}/collections",
            self.base_url, self.tenant, self.database
        )
    }
}

#[async_trait]
impl VectorStore for ChromaClient {
    async fn list_collections(&self) -> Result<Vec<Collection>, VectorDbError> {
        let response = self
            .client
            .get(self.collections_url())
            .header(CHROMA_TOKEN_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VectorDbError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let collections: Vec<Collection> = response.json().await?;
        debug!("Chroma returned {} collections", collections.len());
        Ok(collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    fn config(host: String, ssl: bool) -> ChromaConfig {
        ChromaConfig {
            host,
            tenant: "tenant-1".to_string(),
            database: "cvs".to_string(),
            token: "ck-secret".to_string(),
            ssl,
        }
    }

    #[test]
    fn test_collections_url() {
        let client = ChromaClient::new(&config("api.trychroma.com".into(), true)).unwrap();
        assert_eq!(
            client.collections_url(),
            "https://api.trychroma.com/api/v2/tenants/tenant-1/databases/cvs/collections"
        );
        let client = ChromaClient::new(&config("localhost:8000/".into(), false)).unwrap();
        assert_eq!(
            client.collections_url(),
            "http://localhost:8000/api/v2/tenants/tenant-1/databases/cvs/collections"
        );
    }

    async fn list_handler(
        Path((tenant, database)): Path<(String, String)>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("x-chroma-token").and_then(|v| v.to_str().ok()) != Some("ck-secret") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad token" })));
        }
        assert_eq!(tenant, "tenant-1");
        assert_eq!(database, "cvs");
        (
            StatusCode::OK,
            Json(json!([
                {
                    "id": "6f1c2a3e-0000-0000-0000-000000000001",
                    "name": "candidate_cvs",
                    "metadata": null,
                    "dimension": 1536,
                    "tenant": "tenant-1",
                    "database": "cvs"
                },
                {
                    "id": "6f1c2a3e-0000-0000-0000-000000000002",
                    "name": "job_posts",
                    "metadata": { "owner": "search" }
                }
            ])),
        )
    }

    async fn spawn_chroma() -> String {
        let app = Router::new().route(
            "/api/v2/tenants/:tenant/databases/:database/collections",
            get(list_handler),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr.to_string()
    }

    #[tokio::test]
    async fn test_list_collections_keeps_name_and_id() {
        let host = spawn_chroma().await;
        let client = ChromaClient::new(&config(host, false)).unwrap();
        let collections = client.list_collections().await.unwrap();
        assert_eq!(
            collections,
            vec![
                Collection {
                    name: "candidate_cvs".into(),
                    id: "6f1c2a3e-0000-0000-0000-000000000001".into(),
                },
                Collection {
                    name: "job_posts".into(),
                    id: "6f1c2a3e-0000-0000-0000-000000000002".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_collections_surfaces_api_error() {
        let host = spawn_chroma().await;
        let mut cfg = config(host, false);
        cfg.token = "wrong".to_string();
        let err = ChromaClient::new(&cfg)
            .unwrap()
            .list_collections()
            .await
            .unwrap_err();
        assert!(matches!(err, VectorDbError::Api { status: 401, .. }), "{err}");
    }
}
