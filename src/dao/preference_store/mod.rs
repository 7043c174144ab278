/// JSON file backend.
pub mod file;
/// Volatile backend.
pub mod memory;

use std::{path::PathBuf, sync::Arc};

use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use tracing::{info, warn};

pub use self::{file::FileStore, memory::MemoryStore};

/// Abstraction over the flat key-value store the preferences are persisted in.
///
/// Values are opaque strings; callers own their encoding.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete `key`; deleting a missing key is not an error.
    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the backend can still persist values.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Store selected at startup.
pub struct OpenedStore {
    /// Store the preferences go to.
    pub store: Arc<dyn PreferenceStore>,
    /// Why the configured file could not be used, when the store fell back to memory.
    pub fallback_reason: Option<String>,
}

/// Open the preferences file at `path`, keeping preferences in memory when no path is
/// configured or the file cannot be opened.
pub async fn open_or_memory(path: Option<PathBuf>) -> OpenedStore {
    let Some(path) = path else {
        info!("no storage path configured; preferences kept in memory");
        return OpenedStore {
            store: Arc::new(MemoryStore::new()),
            fallback_reason: None,
        };
    };

    match FileStore::open(path.clone()).await {
        Ok(store) => {
            info!(path = %store.path().display(), "preference file opened");
            OpenedStore {
                store: Arc::new(store),
                fallback_reason: None,
            }
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to open preference file; preferences kept in memory"
            );
            OpenedStore {
                store: Arc::new(MemoryStore::new()),
                fallback_reason: Some(format!(
                    "preferences file {} unavailable ({err}); changes will not be saved",
                    path.display()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_path_is_not_a_fallback() {
        let opened = open_or_memory(None).await;
        assert!(opened.fallback_reason.is_none());
        assert!(opened.store.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_memory_with_a_reason() {
        let dir = std::env::temp_dir().join(format!(
            "luck-center-back-{}",
            uuid::Uuid::new_v4().simple()
        ));
        let path = dir.join("prefs.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{ corrupt").unwrap();

        let opened = open_or_memory(Some(path.clone())).await;
        let reason = opened.fallback_reason.unwrap();
        assert!(reason.contains("prefs.json"));

        opened.store.set("k", "v".into()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ corrupt");

        let _ = std::fs::remove_dir_all(dir);
    }
}
