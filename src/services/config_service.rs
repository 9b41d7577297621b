use serde_json::{Map, Value};

use crate::errors::StoreError;
use crate::services::view_service::TypedConfig;
use crate::state::env_store::{EnvStore, RawConfig};

/// Load the env file and derive the typed view from it.
pub fn current(store: &EnvStore) -> TypedConfig {
    TypedConfig::derive(&store.load())
}

/// Merge a decoded JSON object into the env file.
///
/// The load/overlay/write cycle holds the store's write lock and does
/// blocking file I/O, so it runs on the blocking pool.
pub async fn update(store: &EnvStore, updates: Map<String, Value>) -> Result<RawConfig, StoreError> {
    let store = store.clone();
    let keys = updates.len();

    let merged = tokio::task::spawn_blocking(move || store.merge(updates)).await??;

    tracing::info!("Updated env config: {} key(s) written, {} total", keys, merged.len());
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn update_then_current_reflects_new_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvStore::new(dir.path().join(".env"));
        assert_eq!(current(&store), TypedConfig::default());

        update(&store, object(json!({"SHOULD_STOP": false, "MAX_RUNTIME": 90})))
            .await
            .unwrap();

        assert_eq!(
            current(&store),
            TypedConfig {
                should_stop: false,
                max_runtime: 90
            }
        );
    }

    #[tokio::test]
    async fn concurrent_updates_with_disjoint_keys_both_land() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvStore::new(dir.path().join(".env"));

        let (a, b) = tokio::join!(
            update(&store, object(json!({"SHOULD_STOP": "false"}))),
            update(&store, object(json!({"MAX_RUNTIME": 30}))),
        );
        a.unwrap();
        b.unwrap();

        let raw = store.load();
        assert_eq!(raw.get("SHOULD_STOP").map(String::as_str), Some("false"));
        assert_eq!(raw.get("MAX_RUNTIME").map(String::as_str), Some("30"));
    }

    #[tokio::test]
    async fn update_surfaces_persist_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = EnvStore::new(dir.path().join("missing").join(".env"));

        let err = update(&store, object(json!({"A": 1}))).await.unwrap_err();

        assert!(matches!(err, StoreError::Persist { .. }));
    }
}
