//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every crate of the workspace.

use serde::Serialize;

/// Error classification
///
/// Callers (schedulers, maintenance jobs, host plugins) decide how to react
/// to a failure from its kind alone: report it to the operator, retry on the
/// next tick, or drop the work item.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Misconfigured;
/// assert_eq!(kind.as_str(), "Misconfigured");
/// assert!(!kind.is_transient());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input could not be interpreted (bad name, malformed file)
    InvalidInput,
    /// The referenced record or identity does not exist
    NotFound,
    /// The operation conflicts with current state
    Conflict,
    /// A feature was used while disabled by configuration
    Misconfigured,
    /// A backing store is unreachable or exhausted
    Unavailable,
    /// A backing store did not answer in time
    Timeout,
    /// Anything else
    Internal,
}

impl ErrorKind {
    /// Stable human-readable label
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Misconfigured => "Misconfigured",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Internal => "Internal",
        }
    }

    /// Whether retrying on a later tick may succeed
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Unavailable | ErrorKind::Timeout)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
