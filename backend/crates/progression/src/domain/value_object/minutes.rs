//! Play time in whole minutes.
//!
//! Records never go negative: applying a delta clamps at zero and at
//! `u32::MAX`.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Minutes(u32);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Absolute value written when a delta lands on an empty record
    pub fn from_delta(delta: i64) -> Self {
        Self::ZERO.offset(delta)
    }

    /// Add a signed delta, clamping to the representable range
    pub fn offset(self, delta: i64) -> Self {
        let value = i64::from(self.0).saturating_add(delta);
        Self(value.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl From<u32> for Minutes {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Minutes> for u32 {
    fn from(value: Minutes) -> Self {
        value.0
    }
}

impl From<Minutes> for i64 {
    fn from(value: Minutes) -> Self {
        i64::from(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Minutes::new(30).offset(30), Minutes::new(60));
        assert_eq!(Minutes::new(30).offset(-10), Minutes::new(20));
    }

    #[test]
    fn test_offset_clamps_at_zero() {
        assert_eq!(Minutes::new(5).offset(-50), Minutes::ZERO);
        assert_eq!(Minutes::from_delta(-1), Minutes::ZERO);
    }

    #[test]
    fn test_offset_clamps_at_max() {
        assert_eq!(Minutes::new(u32::MAX).offset(1), Minutes::new(u32::MAX));
    }

    #[test]
    fn test_serialized_as_plain_number() {
        assert_eq!(serde_json::to_string(&Minutes::new(45)).unwrap(), "45");
        assert_eq!(Minutes::new(45).to_string(), "45");
    }
}
