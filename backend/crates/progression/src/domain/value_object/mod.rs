//! Value Objects
//!
//! Immutable, validated building blocks of the progression domain.

pub mod global_time;
pub mod minutes;
pub mod player_id;
pub mod player_name;
pub mod requirement_id;

pub use global_time::GlobalTime;
pub use minutes::Minutes;
pub use player_id::PlayerId;
pub use player_name::{PlayerName, PlayerNameError};
pub use requirement_id::RequirementId;
