//! JSON file backed requirement progress.
//!
//! File layout: `{ "<player uuid>": [1, 2, 5] }`.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use tokio::sync::Mutex;

use crate::domain::repository::{ProgressRepository, ProgressTracker};
use crate::domain::value_object::{PlayerId, RequirementId};
use crate::error::RankupResult;
use crate::infra::{read_json, write_json};

type ProgressMap = HashMap<PlayerId, BTreeSet<RequirementId>>;

pub struct JsonProgressTracker {
    path: PathBuf,
    completed: RwLock<ProgressMap>,
    save_lock: Mutex<()>,
}

impl JsonProgressTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            completed: RwLock::new(HashMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> RankupResult<Self> {
        let tracker = Self::new(path);
        tracker.reload().await?;
        Ok(tracker)
    }

    /// Completed requirements of a player, in id order
    pub fn completed(&self, player: &PlayerId) -> Vec<RequirementId> {
        self.completed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn snapshot(&self) -> HashMap<String, BTreeSet<RequirementId>> {
        self.completed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(player, ids)| (player.to_key(), ids.clone()))
            .collect()
    }
}

impl ProgressTracker for JsonProgressTracker {
    fn has_completed(&self, player: &PlayerId, requirement: RequirementId) -> bool {
        self.completed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player)
            .is_some_and(|ids| ids.contains(&requirement))
    }

    fn mark_completed(&self, player: &PlayerId, requirement: RequirementId) {
        self.completed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(*player)
            .or_default()
            .insert(requirement);
    }

    fn reset(&self, player: &PlayerId) {
        self.completed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(player);
    }
}

impl ProgressRepository for JsonProgressTracker {
    async fn reload(&self) -> RankupResult<()> {
        let stored: HashMap<String, BTreeSet<RequirementId>> =
            read_json(&self.path).await?.unwrap_or_default();

        let mut loaded = ProgressMap::with_capacity(stored.len());
        for (key, ids) in stored {
            match PlayerId::parse_str(&key) {
                Ok(player) => {
                    loaded.insert(player, ids);
                }
                Err(_) => tracing::warn!(key = %key, "Skipping progress entry with an invalid player id"),
            }
        }

        let players = loaded.len();
        *self.completed.write().unwrap_or_else(PoisonError::into_inner) = loaded;

        tracing::info!(path = %self.path.display(), players, "Loaded requirement progress");
        Ok(())
    }

    async fn save(&self) -> RankupResult<()> {
        let _guard = self.save_lock.lock().await;
        let snapshot = self.snapshot();
        write_json(&self.path, &snapshot).await
    }
}
