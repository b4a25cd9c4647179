//! JSON file backed local play time store.
//!
//! Records live in memory and are written back by [`save`]; the file holds a
//! flat `{ "key": minutes }` object.
//!
//! [`save`]: crate::domain::repository::PlaytimeRepository::save

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::domain::repository::PlaytimeRepository;
use crate::domain::value_object::Minutes;
use crate::error::RankupResult;
use crate::infra::{read_json, write_json};

pub struct JsonPlaytimeRepository {
    path: PathBuf,
    records: RwLock<BTreeMap<String, Minutes>>,
    dirty: AtomicBool,
    /// Held across snapshot, write and rename
    save_lock: Mutex<()>,
}

impl JsonPlaytimeRepository {
    /// Empty store bound to `path`; call `reload` to import existing data
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: RwLock::new(BTreeMap::new()),
            dirty: AtomicBool::new(false),
            save_lock: Mutex::new(()),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> RankupResult<Self> {
        let repo = Self::new(path);
        repo.reload().await?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl PlaytimeRepository for JsonPlaytimeRepository {
    async fn get(&self, key: &str) -> RankupResult<Option<Minutes>> {
        Ok(self.records.read().await.get(key).copied())
    }

    async fn set(&self, key: &str, minutes: Minutes) -> RankupResult<()> {
        self.records.write().await.insert(key.to_string(), minutes);
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    async fn remove(&self, key: &str) -> RankupResult<Option<Minutes>> {
        let removed = self.records.write().await.remove(key);
        if removed.is_some() {
            self.dirty.store(true, Ordering::Release);
        }
        Ok(removed)
    }

    async fn keys(&self) -> RankupResult<Vec<String>> {
        Ok(self.records.read().await.keys().cloned().collect())
    }

    async fn reload(&self) -> RankupResult<()> {
        let records: BTreeMap<String, Minutes> = read_json(&self.path).await?.unwrap_or_default();
        let count = records.len();

        *self.records.write().await = records;
        self.dirty.store(false, Ordering::Release);

        tracing::info!(path = %self.path.display(), records = count, "Loaded play time records");
        Ok(())
    }

    async fn save(&self) -> RankupResult<()> {
        let _guard = self.save_lock.lock().await;
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let snapshot = self.records.read().await.clone();
        if let Err(e) = write_json(&self.path, &snapshot).await {
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), records = snapshot.len(), "Saved play time records");
        Ok(())
    }
}
