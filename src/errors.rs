use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by `EnvStore::merge`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to persist config to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be written as a `KEY=VALUE` line that reads back.
    #[error("invalid config key {0:?}")]
    InvalidKey(String),

    #[error("config update task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Malformed stored data. Always recovered locally by falling back to a
/// default; never returned out of a read.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed env file: {0}")]
    EnvFile(#[from] dotenv::Error),

    #[error("invalid {key} value {value:?}: {source}")]
    Integer {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Startup and server failures returned from `main`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config.json: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    #[error("failed to set tracing subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
