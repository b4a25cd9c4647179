//! Player Entity
//!
//! Snapshot of the facts a rank evaluation looks at. It is assembled by the
//! application layer right before evaluation so conditions never touch a
//! store.

use crate::domain::value_object::{GlobalTime, Minutes, PlayerId, PlayerName};

#[derive(Debug, Clone)]
pub struct Player {
    pub player_id: PlayerId,
    pub player_name: PlayerName,
    /// Primary group reported by the rank backend
    pub group: String,
    /// Minutes played on this server (from the configured time source)
    pub local_time: Minutes,
    pub global_time: GlobalTime,
}

impl Player {
    pub fn new(player_id: PlayerId, player_name: PlayerName, group: impl Into<String>) -> Self {
        Self {
            player_id,
            player_name,
            group: group.into(),
            local_time: Minutes::ZERO,
            global_time: GlobalTime::Missing,
        }
    }

    pub fn with_local_time(mut self, minutes: Minutes) -> Self {
        self.local_time = minutes;
        self
    }

    pub fn with_global_time(mut self, global_time: GlobalTime) -> Self {
        self.global_time = global_time;
        self
    }

    /// Whether the player currently sits in `rank`
    pub fn is_in_group(&self, rank: &str) -> bool {
        self.group.eq_ignore_ascii_case(rank)
    }
}
