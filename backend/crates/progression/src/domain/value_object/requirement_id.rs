//! Requirement identifier, unique within one rank change.
//!
//! It is the key of per-player progress and does not depend on what kind of
//! condition the requirement checks.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct RequirementId(u32);

impl RequirementId {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for RequirementId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
