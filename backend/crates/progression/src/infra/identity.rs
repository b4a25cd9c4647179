//! Name to identity directory, persisted as a JSON cache.
//!
//! The host records every joining player with [`remember`]; lookups are
//! case-insensitive. File layout: `{ "notch": "069a79f4-..." }`.
//!
//! [`remember`]: JsonIdentityDirectory::remember

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::{Mutex, RwLock};

use crate::domain::repository::IdentityResolver;
use crate::domain::value_object::{PlayerId, PlayerName};
use crate::error::RankupResult;
use crate::infra::{read_json, write_json};

pub struct JsonIdentityDirectory {
    path: PathBuf,
    entries: RwLock<HashMap<String, PlayerId>>,
    save_lock: Mutex<()>,
}

impl JsonIdentityDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RwLock::new(HashMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> RankupResult<Self> {
        let directory = Self::new(path);

        let stored: HashMap<String, String> = read_json(&directory.path).await?.unwrap_or_default();
        let mut entries = directory.entries.write().await;
        for (name, id) in stored {
            match PlayerId::parse_str(&id) {
                Ok(player_id) => {
                    entries.insert(name.to_ascii_lowercase(), player_id);
                }
                Err(_) => tracing::warn!(player = %name, "Skipping identity with an invalid id"),
            }
        }
        drop(entries);

        Ok(directory)
    }

    /// Record the identity seen for a name; a renamed player simply gets a
    /// second entry
    pub async fn remember(&self, name: &PlayerName, player_id: PlayerId) {
        self.entries
            .write()
            .await
            .insert(name.canonical().to_string(), player_id);
    }

    pub async fn save(&self) -> RankupResult<()> {
        let _guard = self.save_lock.lock().await;
        let snapshot: HashMap<String, String> = self
            .entries
            .read()
            .await
            .iter()
            .map(|(name, id)| (name.clone(), id.to_key()))
            .collect();

        write_json(&self.path, &snapshot).await
    }
}

impl IdentityResolver for JsonIdentityDirectory {
    async fn resolve(&self, name: &PlayerName) -> Option<PlayerId> {
        self.entries.read().await.get(name.canonical()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("identities-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_resolve_ignores_case() {
        let directory = JsonIdentityDirectory::new(temp_path());
        let player_id = PlayerId::new();
        directory
            .remember(&PlayerName::new("Notch").unwrap(), player_id)
            .await;

        let resolved = directory.resolve(&PlayerName::new("NOTCH").unwrap()).await;
        assert_eq!(resolved, Some(player_id));
        assert_eq!(
            directory.resolve(&PlayerName::new("Herobrine").unwrap()).await,
            None
        );
    }

    #[tokio::test]
    async fn test_save_and_open() {
        let path = temp_path();
        let player_id = PlayerId::new();

        let directory = JsonIdentityDirectory::new(&path);
        directory
            .remember(&PlayerName::new("Alex").unwrap(), player_id)
            .await;
        directory.save().await.unwrap();

        let reopened = JsonIdentityDirectory::open(&path).await.unwrap();
        assert_eq!(
            reopened.resolve(&PlayerName::new("alex").unwrap()).await,
            Some(player_id)
        );

        let _ = std::fs::remove_file(path);
    }
}
