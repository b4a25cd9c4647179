//! Player identity, the canonical key of every persisted record.

pub use kernel::id::PlayerId;

/// Heuristic used by the identity migration: stored identifiers always
/// contain the UUID delimiter while player names never may.
pub const IDENTITY_DELIMITER: char = '-';

/// Whether a stored key already looks like a resolved identity
#[inline]
pub fn looks_like_identity(key: &str) -> bool {
    key.contains(IDENTITY_DELIMITER)
}
