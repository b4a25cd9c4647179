//! Conditions
//!
//! A condition answers "does this player qualify right now?" from the
//! [`Player`] snapshot alone. The family is open: hosts add their own kinds
//! by implementing [`Condition`].

use std::fmt;

use crate::domain::entity::player::Player;
use crate::domain::value_object::Minutes;

/// Capability behind every requirement
///
/// `Display` is the description used in diagnostics and in the rendered form
/// of a rank change.
pub trait Condition: fmt::Display + Send + Sync {
    fn is_met(&self, player: &Player) -> bool;
}

/// Minutes played on this server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeCondition {
    pub minimum: Minutes,
}

impl LocalTimeCondition {
    pub fn new(minimum: impl Into<Minutes>) -> Self {
        Self {
            minimum: minimum.into(),
        }
    }
}

impl Condition for LocalTimeCondition {
    fn is_met(&self, player: &Player) -> bool {
        player.local_time >= self.minimum
    }
}

impl fmt::Display for LocalTimeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Play for {} minutes", self.minimum)
    }
}

/// Minutes played across all servers sharing the global store
///
/// Never met while the global time is missing or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalTimeCondition {
    pub minimum: Minutes,
}

impl GlobalTimeCondition {
    pub fn new(minimum: impl Into<Minutes>) -> Self {
        Self {
            minimum: minimum.into(),
        }
    }
}

impl Condition for GlobalTimeCondition {
    fn is_met(&self, player: &Player) -> bool {
        player
            .global_time
            .minutes()
            .is_some_and(|minutes| minutes >= self.minimum)
    }
}

impl fmt::Display for GlobalTimeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Play for {} minutes across all servers", self.minimum)
    }
}
