//! Progression Error Types
//!
//! This module provides progression-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Only store and configuration operations return errors. A requirement or
//! result that does not pass is a `false` outcome of the evaluation, not an
//! error.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Progression-specific result type alias
pub type RankupResult<T> = Result<T, RankupError>;

#[derive(Debug, Error)]
pub enum RankupError {
    /// Name could not be mapped to a player identity
    #[error("Player '{0}' does not have a known identity")]
    IdentityUnresolved(String),

    /// Remote aggregation requested while disabled
    #[error("Global play time is disabled, nothing can be written to it")]
    GlobalTimeDisabled,

    /// Ladder definition is inconsistent
    #[error("Invalid ladder definition: {0}")]
    InvalidLadder(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File store error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RankupError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RankupError::IdentityUnresolved(_) => ErrorKind::NotFound,
            RankupError::GlobalTimeDisabled => ErrorKind::Misconfigured,
            RankupError::InvalidLadder(_) | RankupError::Serialization(_) => {
                ErrorKind::InvalidInput
            }
            RankupError::Database(_) | RankupError::Io(_) => ErrorKind::Unavailable,
            RankupError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            RankupError::GlobalTimeDisabled => {
                err.with_action("Configure a global time database to aggregate play time")
            }
            RankupError::IdentityUnresolved(name) => err
                .with_subject(name.clone())
                .with_action("The player must join once before their time can be changed"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            RankupError::Database(e) => {
                tracing::error!(error = %e, "Global time database error");
            }
            RankupError::Io(e) => {
                tracing::error!(error = %e, "Play time storage error");
            }
            RankupError::Internal(msg) => {
                tracing::error!(message = %msg, "Progression internal error");
            }
            RankupError::GlobalTimeDisabled => {
                tracing::warn!("Global play time write attempted while disabled");
            }
            _ => {
                tracing::debug!(error = %self, "Progression error");
            }
        }
    }
}

impl From<RankupError> for AppError {
    fn from(err: RankupError) -> Self {
        match err {
            RankupError::Database(e) => e.into(),
            RankupError::Io(e) => e.into(),
            RankupError::Serialization(e) => e.into(),
            other => other.to_app_error(),
        }
    }
}
