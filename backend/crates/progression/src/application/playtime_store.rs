//! Play Time Store
//!
//! Single source of truth for minutes played. Local time comes from exactly
//! one backend chosen by [`TimeSourceKind`]; global time comes from the
//! remote aggregated store when it is enabled.
//!
//! ## Failure policy
//! - Reads degrade: an unknown identity or a failing backend reads as no data.
//! - Writes fail loudly: nothing is ever written under a name key.

use std::sync::Arc;

use crate::application::config::{RankupConfig, TimeSourceKind};
use crate::domain::repository::{
    ExternalTimeSource, GlobalTimeRepository, IdentityResolver, PlaytimeRepository,
};
use crate::domain::value_object::player_id::looks_like_identity;
use crate::domain::value_object::{GlobalTime, Minutes, PlayerId, PlayerName};
use crate::error::{RankupError, RankupResult};

pub struct PlaytimeStore<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    local: Arc<L>,
    global: Arc<G>,
    identities: Arc<I>,
    external: Arc<X>,
    time_source: TimeSourceKind,
}

impl<L, G, I, X> PlaytimeStore<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    pub fn new(
        local: Arc<L>,
        global: Arc<G>,
        identities: Arc<I>,
        external: Arc<X>,
        config: &RankupConfig,
    ) -> Self {
        tracing::info!(
            time_source = config.time_source.code(),
            global_time = global.is_enabled(),
            "Play time store ready"
        );

        Self {
            local,
            global,
            identities,
            external,
            time_source: config.time_source,
        }
    }

    pub fn time_source(&self) -> TimeSourceKind {
        self.time_source
    }

    pub async fn resolve(&self, name: &PlayerName) -> Option<PlayerId> {
        self.identities.resolve(name).await
    }

    async fn require_identity(&self, name: &PlayerName) -> RankupResult<PlayerId> {
        self.resolve(name)
            .await
            .ok_or_else(|| RankupError::IdentityUnresolved(name.to_string()))
    }

    // ========================================================================
    // Local time
    // ========================================================================

    /// Minutes played on this server, 0 when nothing is known
    pub async fn local_time(&self, name: &PlayerName) -> Minutes {
        match self.time_source {
            TimeSourceKind::Statistics => match self.external.play_time(name).await {
                Some(minutes) => minutes,
                None => self.internal_time(name).await,
            },
            TimeSourceKind::TimeTracker => {
                self.external.play_time(name).await.unwrap_or_default()
            }
            TimeSourceKind::Internal => self.internal_time(name).await,
        }
    }

    async fn internal_time(&self, name: &PlayerName) -> Minutes {
        let Some(player_id) = self.resolve(name).await else {
            return Minutes::ZERO;
        };

        match self.local.get(&player_id.to_key()).await {
            Ok(minutes) => minutes.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(player = %name, error = %e, "Reading local play time failed");
                Minutes::ZERO
            }
        }
    }

    pub async fn set_local_time(&self, name: &PlayerName, minutes: Minutes) -> RankupResult<()> {
        let player_id = self.require_identity(name).await?;
        self.local.set(&player_id.to_key(), minutes).await
    }

    /// Adjust an existing record; without a record there is nothing to adjust
    pub async fn modify_local_time(&self, name: &PlayerName, delta: i64) -> RankupResult<()> {
        let player_id = self.require_identity(name).await?;
        let key = player_id.to_key();

        match self.local.get(&key).await? {
            Some(current) => self.local.set(&key, current.offset(delta)).await,
            None => {
                tracing::debug!(player = %name, "No local play time to modify");
                Ok(())
            }
        }
    }

    /// Credit minutes from an accounting tick, creating the record on first
    /// observation
    pub async fn credit_local_time(&self, name: &PlayerName, minutes: Minutes) -> RankupResult<()> {
        let player_id = self.require_identity(name).await?;
        let key = player_id.to_key();

        let current = self.local.get(&key).await?.unwrap_or_default();
        self.local
            .set(&key, current.offset(i64::from(minutes)))
            .await
    }

    // ========================================================================
    // Global time
    // ========================================================================

    pub fn is_global_enabled(&self) -> bool {
        self.global.is_enabled()
    }

    /// Minutes played across every server sharing the remote store
    pub async fn global_time(&self, name: &PlayerName) -> GlobalTime {
        if !self.global.is_enabled() {
            return GlobalTime::Disabled;
        }

        let Some(player_id) = self.resolve(name).await else {
            return GlobalTime::Missing;
        };

        match self.global.find(&player_id).await {
            Ok(Some(minutes)) => GlobalTime::Recorded(minutes),
            Ok(None) => GlobalTime::Missing,
            Err(e) => {
                tracing::warn!(player = %name, error = %e, "Reading global play time failed");
                GlobalTime::Missing
            }
        }
    }

    pub async fn set_global_time(&self, name: &PlayerName, minutes: Minutes) -> RankupResult<()> {
        if !self.global.is_enabled() {
            return Err(RankupError::GlobalTimeDisabled);
        }

        let player_id = self.require_identity(name).await?;
        self.global.upsert(&player_id, minutes).await
    }

    /// Adjust the global record; a first write stores the delta itself
    ///
    /// The remote store applies the delta atomically, so servers crediting
    /// the same player at once never lose an increment.
    pub async fn modify_global_time(&self, name: &PlayerName, delta: i64) -> RankupResult<()> {
        if !self.global.is_enabled() {
            return Err(RankupError::GlobalTimeDisabled);
        }

        let player_id = self.require_identity(name).await?;
        self.global.add(&player_id, delta).await?;
        Ok(())
    }

    // ========================================================================
    // Store maintenance
    // ========================================================================

    pub async fn keys(&self) -> RankupResult<Vec<String>> {
        self.local.keys().await
    }

    /// Re-import persisted data, discarding unsaved changes
    pub async fn reload(&self) -> RankupResult<()> {
        self.local.reload().await
    }

    pub async fn save(&self) -> RankupResult<()> {
        self.local.save().await
    }

    /// Remove every record below `minimum`, returning how many were removed
    pub async fn archive(&self, minimum: Minutes) -> RankupResult<usize> {
        let mut archived = 0;

        for key in self.local.keys().await? {
            let Some(minutes) = self.local.get(&key).await? else {
                continue;
            };

            if minutes < minimum {
                self.local.remove(&key).await?;
                archived += 1;
            }
        }

        self.local.save().await?;

        tracing::info!(archived, minimum = %minimum, "Archived inactive play time records");
        Ok(archived)
    }

    /// Re-key legacy name records under the player's identity
    ///
    /// Records whose name cannot be resolved stay where they are. Running it
    /// again is a no-op.
    pub async fn migrate_identity_keys(&self) -> RankupResult<usize> {
        let mut migrated = 0;

        for key in self.local.keys().await? {
            if looks_like_identity(&key) {
                continue;
            }

            let Ok(name) = PlayerName::new(&key) else {
                tracing::warn!(key = %key, "Skipping record with an unusable key");
                continue;
            };

            let Some(player_id) = self.resolve(&name).await else {
                tracing::debug!(player = %name, "No identity known yet, keeping legacy record");
                continue;
            };

            let Some(minutes) = self.local.get(&key).await? else {
                continue;
            };

            let new_key = player_id.to_key();
            if let Some(existing) = self.local.get(&new_key).await? {
                tracing::warn!(
                    player = %name,
                    legacy = %minutes,
                    existing = %existing,
                    "Legacy record replaces an existing identity record"
                );
            }

            self.local.set(&new_key, minutes).await?;
            self.local.remove(&key).await?;
            migrated += 1;

            tracing::info!(player = %name, player_id = %player_id, "Migrated play time record");
        }

        if migrated > 0 {
            self.local.save().await?;
        }

        Ok(migrated)
    }
}
