use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::env_store::{EnvFileState, EnvStore};

pub fn routes(store: EnvStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(store)
}

/// GET /health
///
/// Always 200; a malformed env file reports `degraded`.
async fn health(State(store): State<EnvStore>) -> Json<Value> {
    let body = match store.file_state() {
        EnvFileState::Loaded { entries } => json!({
            "status": "ok",
            "env_file": "loaded",
            "entries": entries,
        }),
        EnvFileState::Missing => json!({
            "status": "ok",
            "env_file": "missing",
            "entries": 0,
        }),
        EnvFileState::Malformed => json!({
            "status": "degraded",
            "env_file": "malformed",
            "entries": 0,
        }),
    };
    Json(body)
}
