//! Rank Change Entity
//!
//! One configured transition from a source rank, optionally to a destination
//! rank. It decides whether a player satisfies its requirements, records the
//! player's progress and applies results.
//!
//! ## Evaluation rules
//! - Requirements are checked in configured order; the first unrecoverable
//!   failure stops the scan.
//! - A completed requirement is remembered by the [`ProgressTracker`] and its
//!   results are never applied twice.
//! - A failing result does not stop the scan, it only makes the outcome false.
//! - Results are not transactional: a partial failure is reported, not undone.

use std::fmt;
use std::sync::Arc;

use crate::domain::effect::Effect;
use crate::domain::entity::player::Player;
use crate::domain::entity::requirement::Requirement;
use crate::domain::repository::ProgressTracker;

/// Rendered in place of a missing requirement or result entry
pub const NULL_ENTRY: &str = "NULL";

#[derive(Clone)]
pub struct RankChange {
    rank: String,
    rank_to: Option<String>,
    /// `None` marks a broken configuration entry
    requirements: Vec<Option<Requirement>>,
    results: Vec<Option<Arc<dyn Effect>>>,
}

impl RankChange {
    pub fn new(
        rank: impl Into<String>,
        rank_to: Option<String>,
        requirements: Vec<Option<Requirement>>,
        results: Vec<Option<Arc<dyn Effect>>>,
    ) -> Self {
        Self {
            rank: rank.into(),
            rank_to,
            requirements,
            results,
        }
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn rank_to(&self) -> Option<&str> {
        self.rank_to.as_deref()
    }

    /// Without a destination the change only gates on its requirements
    pub fn has_rank_up(&self) -> bool {
        self.rank_to.is_some()
    }

    pub fn requirements(&self) -> &[Option<Requirement>] {
        &self.requirements
    }

    pub fn results(&self) -> &[Option<Arc<dyn Effect>>] {
        &self.results
    }

    /// Gate the transition on every requirement, recording progress
    pub fn check_requirements(&self, player: &Player, progress: &dyn ProgressTracker) -> bool {
        let mut passed = true;

        for entry in &self.requirements {
            let Some(requirement) = entry else {
                tracing::warn!(rank = %self.rank, "Rank change has an empty requirement entry");
                return false;
            };

            if requirement.optional {
                continue;
            }

            let completed = progress.has_completed(&player.player_id, requirement.id);

            // Recorded progress outlives the instantaneous state.
            if completed && !requirement.auto_complete {
                continue;
            }

            if !requirement.is_met(player) {
                tracing::debug!(
                    player = %player.player_name,
                    rank = %self.rank,
                    requirement = %requirement.id,
                    "Requirement not met"
                );
                return false;
            }

            if completed {
                continue;
            }

            progress.mark_completed(&player.player_id, requirement.id);
            tracing::debug!(
                player = %player.player_name,
                rank = %self.rank,
                requirement = %requirement.id,
                "Requirement completed"
            );

            if !requirement.apply_results(player) {
                tracing::warn!(
                    player = %player.player_name,
                    requirement = %requirement.id,
                    "Requirement result failed"
                );
                passed = false;
            }
        }

        passed
    }

    /// Requirements the player does not meet right now
    ///
    /// Reporting only: recorded progress is ignored, unlike
    /// [`check_requirements`](Self::check_requirements). A broken entry is
    /// reported as `None`.
    pub fn failed_requirements(&self, player: &Player) -> Vec<Option<&Requirement>> {
        self.requirements
            .iter()
            .map(Option::as_ref)
            .filter(|entry| entry.is_none_or(|requirement| !requirement.is_met(player)))
            .collect()
    }

    /// Check requirements, then apply every final result
    ///
    /// Returns true only if the requirements pass and every final result
    /// succeeds.
    pub fn apply_change(
        &self,
        player: &Player,
        progress: &dyn ProgressTracker,
        group: &str,
    ) -> bool {
        if !self.check_requirements(player, progress) {
            return false;
        }

        self.results
            .iter()
            .flatten()
            .fold(true, |ok, result| result.apply(player, Some(group)) && ok)
    }
}

impl fmt::Debug for RankChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankChange")
            .field("rank", &self.rank)
            .field("rank_to", &self.rank_to)
            .field("requirements", &self.requirements)
            .field("results", &self.results.len())
            .finish()
    }
}

fn join_entries<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    entries: impl IntoIterator<Item = Option<T>>,
) -> fmt::Result {
    for (index, entry) in entries.into_iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        match entry {
            Some(entry) => write!(f, "{entry}")?,
            None => f.write_str(NULL_ENTRY)?,
        }
    }
    Ok(())
}

/// `rank: req, req -> res, res`
impl fmt::Display for RankChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.rank)?;
        join_entries(f, self.requirements.iter().map(Option::as_ref))?;
        f.write_str(" -> ")?;
        join_entries(f, self.results.iter().map(Option::as_ref))
    }
}
