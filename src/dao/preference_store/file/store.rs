use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use super::error::{FileStoreError, FileStoreResult};
use crate::dao::{preference_store::PreferenceStore, storage::StorageResult};

/// Preferences kept as one JSON object of strings on disk.
///
/// Values are cached in memory; every mutation rewrites the whole file through a
/// temporary sibling and a rename so a crash never leaves a half-written file.
#[derive(Clone)]
pub struct FileStore {
    path: Arc<Path>,
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Open the store at `path`, creating its directory. A missing file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> FileStoreResult<Self> {
        let path: PathBuf = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| FileStoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let values = match fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str::<BTreeMap<String, String>>(&contents)
                .map_err(|source| FileStoreError::Parse {
                    path: path.clone(),
                    source,
                })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(FileStoreError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        debug!(path = %path.display(), entries = values.len(), "opened preferences file");

        Ok(Self {
            path: Arc::from(path),
            values: Arc::new(Mutex::new(values)),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn get_value(&self, key: &str) -> FileStoreResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn mutate<F>(&self, change: F) -> FileStoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        // Held across the write so concurrent mutations land on disk in order.
        let mut values = self.values.lock().await;
        let mut next = values.clone();
        change(&mut next);
        self.persist(&next).await?;
        *values = next;
        Ok(())
    }

    async fn persist(&self, values: &BTreeMap<String, String>) -> FileStoreResult<()> {
        let encoded = serde_json::to_string_pretty(values)
            .map_err(|source| FileStoreError::Encode { source })?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, encoded)
            .await
            .map_err(|source| FileStoreError::Write {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| FileStoreError::Write {
                path: self.path.to_path_buf(),
                source,
            })
    }

    async fn check_directory(&self) -> FileStoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        match fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(FileStoreError::MissingDirectory { path: dir }),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let store = self.clone();
        let key = key.to_string();
        Box::pin(async move { store.get_value(&key).await.map_err(Into::into) })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let key = key.to_string();
        Box::pin(async move {
            store
                .mutate(|values| {
                    values.insert(key, value);
                })
                .await
                .map_err(Into::into)
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let key = key.to_string();
        Box::pin(async move {
            store
                .mutate(|values| {
                    values.remove(&key);
                })
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.check_directory().await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("luck-center-back-{}", uuid::Uuid::new_v4().simple()))
            .join(name)
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let path = scratch_path("prefs.json");
        let store = FileStore::open(&path).await.unwrap();
        store.set("wheelNames", "[\"a\"]".into()).await.unwrap();
        store.set("luckCenter_lightMode", "true".into()).await.unwrap();
        store.remove("luckCenter_lightMode").await.unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("wheelNames").await.unwrap(),
            Some("[\"a\"]".to_string())
        );
        assert_eq!(reopened.get("luckCenter_lightMode").await.unwrap(), None);
        assert!(reopened.health_check().await.is_ok());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let path = scratch_path("prefs.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).await.err().unwrap();
        assert!(matches!(err, FileStoreError::Parse { .. }));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn missing_directory_fails_health_check() {
        let path = scratch_path("prefs.json");
        let store = FileStore::open(&path).await.unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert!(store.health_check().await.is_err());
    }
}
