//! Repository Traits
//!
//! Interfaces for data persistence and host capabilities. Implementations are
//! in the infrastructure layer (or provided by the host).

use crate::domain::value_object::{Minutes, PlayerId, PlayerName, RequirementId};
use crate::error::RankupResult;

/// Local persisted play time store: string key to minutes
///
/// Keys are identity keys (`PlayerId::to_key`) except for legacy records that
/// still await migration.
#[trait_variant::make(PlaytimeRepository: Send)]
pub trait LocalPlaytimeRepository {
    async fn get(&self, key: &str) -> RankupResult<Option<Minutes>>;

    async fn set(&self, key: &str, minutes: Minutes) -> RankupResult<()>;

    /// Delete a record, returning its last value
    async fn remove(&self, key: &str) -> RankupResult<Option<Minutes>>;

    /// Owned snapshot of every key; later mutations do not affect it
    async fn keys(&self) -> RankupResult<Vec<String>>;

    /// Replace in-memory state with the persisted copy
    async fn reload(&self) -> RankupResult<()>;

    async fn save(&self) -> RankupResult<()>;
}

/// Remote store aggregating play time across servers
#[trait_variant::make(GlobalTimeRepository: Send)]
pub trait LocalGlobalTimeRepository {
    fn is_enabled(&self) -> bool;

    async fn find(&self, player_id: &PlayerId) -> RankupResult<Option<Minutes>>;

    async fn upsert(&self, player_id: &PlayerId, minutes: Minutes) -> RankupResult<()>;

    /// Offset a record in one atomic step, creating it from the delta when
    /// absent; returns the stored value
    async fn add(&self, player_id: &PlayerId, delta: i64) -> RankupResult<Minutes>;
}

/// Maps a display name to the player's identity
#[trait_variant::make(IdentityResolver: Send)]
pub trait LocalIdentityResolver {
    async fn resolve(&self, name: &PlayerName) -> Option<PlayerId>;
}

/// Statistics or time-tracking plugin providing minutes played
#[trait_variant::make(ExternalTimeSource: Send)]
pub trait LocalExternalTimeSource {
    /// `None` when the source has no handler or no data for the player
    async fn play_time(&self, name: &PlayerName) -> Option<Minutes>;
}

/// Per-player memory of completed requirements
///
/// Synchronous on purpose: it is consulted in the middle of an evaluation.
pub trait ProgressTracker: Send + Sync {
    fn has_completed(&self, player: &PlayerId, requirement: RequirementId) -> bool;

    fn mark_completed(&self, player: &PlayerId, requirement: RequirementId);

    /// Forget every completed requirement of a player
    fn reset(&self, player: &PlayerId);
}

/// Lists the players currently online
pub trait OnlineRoster: Send + Sync {
    fn online_players(&self) -> Vec<PlayerName>;
}

/// Persistence of a [`ProgressTracker`]
#[trait_variant::make(ProgressRepository: Send)]
pub trait LocalProgressRepository: ProgressTracker {
    async fn reload(&self) -> RankupResult<()>;

    async fn save(&self) -> RankupResult<()>;
}
