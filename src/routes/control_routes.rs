use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};

use crate::errors::StoreError;
use crate::services::config_service;
use crate::state::env_store::EnvStore;

/// Build the control routes: stop flag, runtime limit and config updates.
pub fn routes(store: EnvStore) -> Router {
    Router::new()
        .route("/should-stop", get(should_stop))
        .route("/max-runtime", get(max_runtime))
        .route("/update-config", post(update_config))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// GET /should-stop
// `true` or `false`
// ─────────────────────────────────────────────────────────────
//
async fn should_stop(State(store): State<EnvStore>) -> Json<bool> {
    Json(config_service::current(&store).should_stop)
}

//
// ─────────────────────────────────────────────────────────────
// GET /max-runtime
// Allowed runtime in seconds, `0` when unset
// ─────────────────────────────────────────────────────────────
//
async fn max_runtime(State(store): State<EnvStore>) -> Json<u64> {
    let view = config_service::current(&store);
    tracing::info!("MAX_RUNTIME: {}", view.max_runtime);
    Json(view.max_runtime)
}

//
// ─────────────────────────────────────────────────────────────
// POST /update-config
// Merge a JSON object of values into the env file
// 400 on a non-object body or a key the env file cannot hold
// (first char ASCII letter or `_`, then ASCII alnum, `_` or `.`)
// 500 when the write fails
// ─────────────────────────────────────────────────────────────
//
async fn update_config(
    State(store): State<EnvStore>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, String)> {
    // Content type is not required; any body holding a JSON object is accepted.
    let updates: Map<String, Value> = serde_json::from_slice(&body)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid JSON".to_string()))?;

    match config_service::update(&store, updates).await {
        Ok(_) => Ok(Json(json!({
            "message": "Configuration updated successfully"
        }))),
        Err(StoreError::InvalidKey(key)) => {
            Err((StatusCode::BAD_REQUEST, format!("Invalid config key: {key:?}")))
        }
        Err(e) => {
            tracing::error!("Failed to write env config: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update config".to_string(),
            ))
        }
    }
}
