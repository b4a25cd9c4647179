//! Evaluate Player Use Case
//!
//! Runs every configured rank change that starts at the player's current
//! group and applies the first one that passes.

use std::sync::Arc;

use crate::application::playtime_store::PlaytimeStore;
use crate::domain::effect::RankBackend;
use crate::domain::entity::player::Player;
use crate::domain::entity::rank_change::{NULL_ENTRY, RankChange};
use crate::domain::repository::{
    ExternalTimeSource, GlobalTimeRepository, IdentityResolver, PlaytimeRepository,
    ProgressTracker,
};
use crate::domain::value_object::PlayerName;
use crate::error::{RankupError, RankupResult};

/// Evaluation output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// A rank change passed and its results were applied
    Promoted { from: String, to: String },
    /// A requirements-only change passed
    RequirementsMet { rank: String },
    /// Nothing passed yet; descriptions of requirements not met right now
    Pending { failed: Vec<String> },
    /// No rank change starts at the player's group
    NoMatchingRank,
    /// The rank backend does not know the player's group
    NoGroup,
}

/// Evaluate player use case
pub struct EvaluatePlayerUseCase<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    store: Arc<PlaytimeStore<L, G, I, X>>,
    progress: Arc<dyn ProgressTracker>,
    backend: Arc<dyn RankBackend>,
    ladder: Arc<Vec<RankChange>>,
}

impl<L, G, I, X> EvaluatePlayerUseCase<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    pub fn new(
        store: Arc<PlaytimeStore<L, G, I, X>>,
        progress: Arc<dyn ProgressTracker>,
        backend: Arc<dyn RankBackend>,
        ladder: Arc<Vec<RankChange>>,
    ) -> Self {
        Self {
            store,
            progress,
            backend,
            ladder,
        }
    }

    pub fn store(&self) -> &Arc<PlaytimeStore<L, G, I, X>> {
        &self.store
    }

    /// Collect the facts conditions look at
    pub async fn snapshot(&self, name: &PlayerName) -> RankupResult<Option<Player>> {
        let player_id = self
            .store
            .resolve(name)
            .await
            .ok_or_else(|| RankupError::IdentityUnresolved(name.to_string()))?;

        let Some(group) = self.backend.primary_group(&player_id) else {
            return Ok(None);
        };

        let local_time = self.store.local_time(name).await;
        let global_time = self.store.global_time(name).await;

        Ok(Some(
            Player::new(player_id, name.clone(), group)
                .with_local_time(local_time)
                .with_global_time(global_time),
        ))
    }

    pub async fn execute(&self, name: &PlayerName) -> RankupResult<Evaluation> {
        let Some(player) = self.snapshot(name).await? else {
            tracing::debug!(player = %name, "Player has no group, skipping evaluation");
            return Ok(Evaluation::NoGroup);
        };

        Ok(self.evaluate(&player))
    }

    fn left_group(&self, player: &Player) -> bool {
        self.backend
            .primary_group(&player.player_id)
            .is_some_and(|group| !player.is_in_group(&group))
    }

    /// Evaluate an already collected snapshot
    pub fn evaluate(&self, player: &Player) -> Evaluation {
        let mut matched = false;
        let mut failed = Vec::new();

        for change in self.ladder.iter().filter(|c| player.is_in_group(c.rank())) {
            matched = true;

            let passed = match change.rank_to() {
                Some(to) => change.apply_change(player, self.progress.as_ref(), to),
                None => change.check_requirements(player, self.progress.as_ref()),
            };

            if !passed {
                failed.extend(change.failed_requirements(player).into_iter().map(|entry| {
                    entry.map_or_else(|| NULL_ENTRY.to_string(), ToString::to_string)
                }));

                // A group result may have landed before a later result failed.
                if change.rank_to().is_some() && self.left_group(player) {
                    self.progress.reset(&player.player_id);
                    tracing::warn!(
                        player = %player.player_name,
                        from = %change.rank(),
                        "Player changed group but a rank change result failed"
                    );
                    return Evaluation::Pending { failed };
                }
                continue;
            }

            return match change.rank_to() {
                Some(to) => {
                    // The next rank starts from a clean slate.
                    self.progress.reset(&player.player_id);
                    tracing::info!(
                        player = %player.player_name,
                        from = %change.rank(),
                        to,
                        "Player ranked up"
                    );
                    Evaluation::Promoted {
                        from: change.rank().to_string(),
                        to: to.to_string(),
                    }
                }
                None => Evaluation::RequirementsMet {
                    rank: change.rank().to_string(),
                },
            };
        }

        if matched {
            Evaluation::Pending { failed }
        } else {
            Evaluation::NoMatchingRank
        }
    }
}
