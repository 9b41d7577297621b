/*****************************************************************************************
 *
 *  runctl – HTTP control-plane for a remote process
 *  ------------------------------------------------
 *
 *  Stop flag + runtime limit + log sink, backed by a flat env file
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod persistence;
mod routes;
mod services;
mod state;

use tokio::net::TcpListener;
use axum::serve;

use tracing_subscriber::FmtSubscriber;
use tracing::level_filters::LevelFilter;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::state::env_store::EnvStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    //
    // ────────────────────────────────────────────────────────
    //  Locate and load config.json (defaults when absent)
    // ────────────────────────────────────────────────────────
    //
    let config_path = AppConfig::locate();
    let cfg = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let level = match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info"  => LevelFilter::INFO,
        "warn"  => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match &config_path {
        Some(path) => tracing::info!("Loaded config.json from {}", path.display()),
        None => tracing::info!("No config.json found, using defaults"),
    }

    tracing::info!("Starting runctl…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Env file store (owns SHOULD_STOP / MAX_RUNTIME)
    // ────────────────────────────────────────────────────────
    //
    let store = EnvStore::new(cfg.env_path.clone());
    tracing::info!(
        "Env file: {} ({:?})",
        store.path().display(),
        store.file_state()
    );

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let app = app::build_app(store);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .map_err(AppError::Serve)?;

    Ok(())
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received — shutting down");
}
