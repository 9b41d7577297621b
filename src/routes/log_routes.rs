use axum::{body::Bytes, routing::post, Router};

use crate::services::log_service;

pub fn routes() -> Router {
    Router::new().route("/log", post(receive_log))
}

/// POST /log
async fn receive_log(body: Bytes) -> &'static str {
    log_service::record(&String::from_utf8_lossy(&body));
    "Received"
}
