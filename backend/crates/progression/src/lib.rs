//! Progression Module
//!
//! Play time accounting and time-based rank progression for a game server.
//!
//! Clean Architecture structure:
//! - `domain/` - Conditions, effects, rank changes, repository traits
//! - `application/` - Play time store, evaluation and accounting use cases
//! - `infra/` - JSON file stores and the PostgreSQL global time store
//!
//! ## Features
//! - Local play time per player, read from the internal store or an external
//!   statistics / time-tracking source
//! - Optional global play time aggregated across servers in PostgreSQL
//! - Rank ladder loaded from JSON: requirements, memoized progress and
//!   group change / message results
//! - Maintenance: archiving inactive records and re-keying legacy name
//!   records under player identities

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::{RankupConfig, TimeSourceKind};
pub use error::{RankupError, RankupResult};
pub use infra::file_store::JsonPlaytimeRepository;
pub use infra::global::GlobalTimeBackend;
pub use infra::postgres::PgGlobalTimeRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::identity::JsonIdentityDirectory as IdentityStore;
    pub use crate::infra::progress::JsonProgressTracker as ProgressStore;
}
