use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::errors::{ParseError, StoreError};
use crate::persistence::{is_valid_key, read_env_file, write_env_file};
use crate::state::value::ConfigValue;

/// Flat key/value image of the env file. Ordered so the file is written
/// sorted by key.
pub type RawConfig = BTreeMap<String, String>;

/// What a read of the env file currently finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileState {
    Loaded { entries: usize },
    Missing,
    /// Present but unparseable; reads see it as empty.
    Malformed,
}

/// Env-file-backed config store.
///
/// Clones share the same file and the same write lock, so every `merge`
/// issued through any clone is serialized: two concurrent merges both land.
/// Reads take no lock; writes replace the file by rename, so a reader sees
/// either the old or the new content.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl EnvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current raw config. A missing file is the first-run state and a
    /// malformed one is treated as empty; neither is an error.
    pub fn load(&self) -> RawConfig {
        match read_env_file(&self.path) {
            Ok(raw) => raw,
            Err(e) if is_not_found(&e) => {
                tracing::debug!("No env file at {}, starting empty", self.path.display());
                RawConfig::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable env file {}: {e}", self.path.display());
                RawConfig::new()
            }
        }
    }

    /// Classify the env file without substituting defaults.
    pub fn file_state(&self) -> EnvFileState {
        match read_env_file(&self.path) {
            Ok(raw) => EnvFileState::Loaded { entries: raw.len() },
            Err(e) if is_not_found(&e) => EnvFileState::Missing,
            Err(_) => EnvFileState::Malformed,
        }
    }

    /// Overlay `updates` onto the stored config and write the result back.
    ///
    /// Keys not in `updates` are kept as they are. Returns the merged
    /// mapping. On failure the previous file is left in place.
    pub fn merge<I, V>(&self, updates: I) -> Result<RawConfig, StoreError>
    where
        I: IntoIterator<Item = (String, V)>,
        V: Into<ConfigValue>,
    {
        let coerced = updates
            .into_iter()
            .map(|(key, value)| {
                if is_valid_key(&key) {
                    Ok((key, value.into().coerce()))
                } else {
                    Err(StoreError::InvalidKey(key))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut raw = self.load();
        raw.extend(coerced);

        write_env_file(&self.path, &raw).map_err(|source| StoreError::Persist {
            path: self.path.to_path_buf(),
            source,
        })?;

        Ok(raw)
    }
}

fn is_not_found(e: &ParseError) -> bool {
    matches!(e, ParseError::EnvFile(dotenv::Error::Io(io)) if io.kind() == ErrorKind::NotFound)
}
