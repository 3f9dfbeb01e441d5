//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
    /// "postgres" or "memory".
    pub storage: &'static str,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.config().storage.as_str(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use notes_store::MemoryStore;

    use crate::config::{ServerConfig, StorageBackend};

    #[tokio::test]
    async fn test_health_reports_storage_backend() {
        let mut config = ServerConfig::new("health-secret");
        config.storage = StorageBackend::Memory;
        let state = AppState::with_store(config, Arc::new(MemoryStore::new()));

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "memory");
        assert!(!body.version.is_empty());
    }
}
