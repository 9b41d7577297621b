use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::AppError;

/// Environment variable that points at an explicit `config.json`.
pub const CONFIG_PATH_VAR: &str = "RUNCTL_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// HTTP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the env file holding SHOULD_STOP, MAX_RUNTIME and any other
    /// values posted to /update-config.
    #[serde(default = "default_env_path")]
    pub env_path: PathBuf,
}

fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_env_path() -> PathBuf {
    PathBuf::from(".env")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            env_path: default_env_path(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let file = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str::<AppConfig>(&file)?)
    }

    /// Find `config.json`: `$RUNCTL_CONFIG`, then the executable's folder,
    /// its parent, then the working directory.
    pub fn locate() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(explicit));
        }

        let mut candidates = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join("config.json"));
            candidates.push(exe_dir.join("..").join("config.json"));
        }
        candidates.push(PathBuf::from("config.json"));

        candidates.into_iter().find(|p| p.exists())
    }
}
