use std::{collections::BTreeMap, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::PreferenceStore;
use crate::dao::storage::StorageResult;

/// Volatile store used by tests and when no storage path is configured.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let values = self.values.clone();
        let key = key.to_string();
        Box::pin(async move { Ok(values.read().await.get(&key).cloned()) })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let values = self.values.clone();
        let key = key.to_string();
        Box::pin(async move {
            values.write().await.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let values = self.values.clone();
        let key = key.to_string();
        Box::pin(async move {
            values.write().await.remove(&key);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
