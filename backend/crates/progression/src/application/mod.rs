//! Application Layer
//!
//! Use cases and application services.

pub mod accounting;
pub mod config;
pub mod evaluate_player;
pub mod ladder;
pub mod playtime_store;

// Re-exports
pub use accounting::{AccountingUseCase, TickReport, spawn_accounting, spawn_autosave};
pub use config::{RankupConfig, TimeSourceKind};
pub use evaluate_player::{EvaluatePlayerUseCase, Evaluation};
pub use ladder::LadderDefinition;
pub use playtime_store::PlaytimeStore;
