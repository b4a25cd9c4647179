//! Cross-server play time as read from the remote aggregated store.

use super::minutes::Minutes;

/// Outcome of a global play time lookup
///
/// `Missing` and `Recorded(Minutes::ZERO)` are different facts: zero is a
/// valid recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalTime {
    Recorded(Minutes),
    #[default]
    Missing,
    /// Remote aggregation is turned off
    Disabled,
}

impl GlobalTime {
    /// Value reported for anything but a recorded time
    pub const NOT_FOUND: i64 = -1;

    #[inline]
    pub fn minutes(self) -> Option<Minutes> {
        match self {
            GlobalTime::Recorded(minutes) => Some(minutes),
            GlobalTime::Missing | GlobalTime::Disabled => None,
        }
    }

    /// Numeric form where absence is `-1`
    #[inline]
    pub fn as_sentinel(self) -> i64 {
        self.minutes().map_or(Self::NOT_FOUND, i64::from)
    }
}
