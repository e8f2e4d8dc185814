use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

/// StorageError
///
/// Failure of the underlying key-value slot. The session layer above never lets these
/// reach a reader; they only surface on writes.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

// 1. SessionStorage Contract
/// SessionStorage
///
/// A small durable string map, shaped like browser local storage. Multi-key writes and
/// removals are all-or-nothing: an implementation either applies every pair or none.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a single key. `Ok(None)` when the key is absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Reads several keys from one consistent snapshot, in the order given. A concurrent
    /// write is seen either completely or not at all.
    async fn get_items(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError>;

    /// Writes every pair in one atomic step.
    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Removes every key in one atomic step. Absent keys are not an error.
    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError>;
}

// 2. The Real Implementation (JSON file)
/// FileSessionStorage
///
/// Keeps the map as one JSON object on disk. Writes go to a sibling temp file that is
/// flushed to disk and then renamed over the live file, so readers and restarts only ever
/// see a complete map.
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process.
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `load`, but an unreadable file is discarded instead of blocking the write.
    async fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load().await {
            Err(StorageError::Decode(e)) => {
                tracing::warn!(path = %self.path.display(), "Discarding corrupt session file: {}", e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&serde_json::to_vec_pretty(map)?).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.remove(key))
    }

    async fn get_items(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        // One read of the file; rename makes each read see a single version.
        let mut map = self.load().await?;
        Ok(keys.iter().map(|key| map.remove(*key)).collect())
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_for_write().await?;
        for (key, value) in items {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&map).await
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_for_write().await?;
        let before = map.len();
        map.retain(|key, _| !keys.contains(&key.as_str()));
        if map.len() == before {
            return Ok(());
        }
        self.persist(&map).await
    }
}

// 3. The Mock Implementation (For Tests)
/// MemorySessionStorage
///
/// In-process map used by tests and by the router tests' application state. Can be
/// seeded with arbitrary (including torn) contents and switched into a failing mode.
#[derive(Default)]
pub struct MemorySessionStorage {
    items: Mutex<BTreeMap<String, String>>,
    /// When true, every operation returns `StorageError::Unavailable`.
    pub should_fail: bool,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populates the map, bypassing the all-or-nothing write path.
    pub fn with_items(items: &[(&str, &str)]) -> Self {
        let map = items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            items: Mutex::new(map),
            should_fail: false,
        }
    }

    /// Copy of the current contents, for assertions.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        let items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        Ok(items.get(key).cloned())
    }

    async fn get_items(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        self.check()?;
        let items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        Ok(keys.iter().map(|key| items.get(*key).cloned()).collect())
    }

    async fn set_items(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.check()?;
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        for (key, value) in pairs {
            items.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.check()?;
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// SessionStorageState
///
/// The concrete type used to share the storage backend across the application state.
pub type SessionStorageState = Arc<dyn SessionStorage>;
