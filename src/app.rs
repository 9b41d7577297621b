use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::{control_routes, health_routes, log_routes};
use crate::state::env_store::EnvStore;

/// Build the complete Axum application:
/// - /log, /should-stop, /max-runtime, /update-config
/// - /health   (env file readable or not)
///
/// `store` is the single owner of the stop flag and runtime limit; handlers
/// reach it through router state.
pub fn build_app(store: EnvStore) -> Router {
    Router::new()
        .merge(control_routes::routes(store.clone()))
        .merge(log_routes::routes())
        .merge(health_routes::routes(store))

        // CORS: any origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
