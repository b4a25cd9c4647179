//! Effects
//!
//! Side effects applied to a player when a requirement is first completed or
//! when a whole rank change passes. Effects report success as a boolean and
//! are never rolled back.

use std::fmt;
use std::sync::Arc;

use crate::domain::entity::player::Player;
use crate::domain::value_object::PlayerId;

/// Capability behind every result of a rank change
pub trait Effect: fmt::Display + Send + Sync {
    /// `target_group` is the destination rank for final results and `None`
    /// for per-requirement results.
    fn apply(&self, player: &Player, target_group: Option<&str>) -> bool;
}

/// Permission/rank backend of the host server
pub trait RankBackend: Send + Sync {
    fn primary_group(&self, player: &PlayerId) -> Option<String>;

    fn change_group(&self, player: &PlayerId, from: &str, to: &str) -> bool;
}

/// Delivers a message to an online player
pub trait Notifier: Send + Sync {
    fn notify(&self, player: &Player, message: &str) -> bool;
}

/// Moves the player from their current group to the target group
///
/// A fixed `group` overrides the target passed by the rank change. Without
/// either there is nothing to move to and the effect fails.
#[derive(Clone)]
pub struct ChangeGroupEffect {
    backend: Arc<dyn RankBackend>,
    group: Option<String>,
}

impl ChangeGroupEffect {
    pub fn new(backend: Arc<dyn RankBackend>) -> Self {
        Self {
            backend,
            group: None,
        }
    }

    pub fn to_group(backend: Arc<dyn RankBackend>, group: impl Into<String>) -> Self {
        Self {
            backend,
            group: Some(group.into()),
        }
    }
}

impl Effect for ChangeGroupEffect {
    fn apply(&self, player: &Player, target_group: Option<&str>) -> bool {
        let Some(to) = self.group.as_deref().or(target_group) else {
            tracing::warn!(player = %player.player_name, "Group change without a target group");
            return false;
        };

        let changed = self.backend.change_group(&player.player_id, &player.group, to);
        if changed {
            tracing::info!(
                player = %player.player_name,
                from = %player.group,
                to,
                "Changed player group"
            );
        }
        changed
    }
}

impl fmt::Display for ChangeGroupEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "Change group to {group}"),
            None => f.write_str("Change group"),
        }
    }
}

/// Sends a message; `&p` expands to the player's name
#[derive(Clone)]
pub struct MessageEffect {
    notifier: Arc<dyn Notifier>,
    template: String,
}

impl MessageEffect {
    pub const PLAYER_PLACEHOLDER: &'static str = "&p";

    pub fn new(notifier: Arc<dyn Notifier>, template: impl Into<String>) -> Self {
        Self {
            notifier,
            template: template.into(),
        }
    }

    pub fn render(&self, player: &Player) -> String {
        self.template
            .replace(Self::PLAYER_PLACEHOLDER, player.player_name.original())
    }
}

impl Effect for MessageEffect {
    fn apply(&self, player: &Player, _target_group: Option<&str>) -> bool {
        self.notifier.notify(player, &self.render(player))
    }
}

impl fmt::Display for MessageEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message: {}", self.template)
    }
}
