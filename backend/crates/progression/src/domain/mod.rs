//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Value objects (PlayerId, PlayerName, Minutes, GlobalTime, RequirementId)
//! - Entities (Player snapshot, Requirement, RankChange)
//! - Condition and effect capabilities with the built-in kinds
//! - Repository traits (interfaces)

pub mod condition;
pub mod effect;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use condition::Condition;
pub use effect::{Effect, Notifier, RankBackend};
pub use entity::{player::Player, rank_change::RankChange, requirement::Requirement};
pub use repository::{
    ExternalTimeSource, GlobalTimeRepository, IdentityResolver, OnlineRoster, PlaytimeRepository,
    ProgressRepository, ProgressTracker,
};
