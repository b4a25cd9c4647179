//! Requirement Entity
//!
//! One gate of a rank change: a condition plus the results granted the first
//! time the condition is satisfied.

use std::fmt;
use std::sync::Arc;

use crate::domain::condition::Condition;
use crate::domain::effect::Effect;
use crate::domain::entity::player::Player;
use crate::domain::value_object::RequirementId;

#[derive(Clone)]
pub struct Requirement {
    /// Progress key, unique within the owning rank change
    pub id: RequirementId,
    /// Always counted as satisfied
    pub optional: bool,
    /// Re-evaluated on every check instead of trusting recorded progress
    pub auto_complete: bool,
    condition: Arc<dyn Condition>,
    /// Applied once, when the requirement is first completed
    results: Vec<Arc<dyn Effect>>,
}

impl Requirement {
    pub fn new(id: impl Into<RequirementId>, condition: Arc<dyn Condition>) -> Self {
        Self {
            id: id.into(),
            optional: false,
            auto_complete: false,
            condition,
            results: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn auto_complete(mut self, auto_complete: bool) -> Self {
        self.auto_complete = auto_complete;
        self
    }

    pub fn with_result(mut self, result: Arc<dyn Effect>) -> Self {
        self.results.push(result);
        self
    }

    /// Instantaneous evaluation, ignoring any recorded progress
    #[inline]
    pub fn is_met(&self, player: &Player) -> bool {
        self.condition.is_met(player)
    }

    pub fn results(&self) -> &[Arc<dyn Effect>] {
        &self.results
    }

    /// Apply every per-requirement result; true only if all succeeded.
    /// Every result is attempted even after a failure.
    pub(crate) fn apply_results(&self, player: &Player) -> bool {
        self.results
            .iter()
            .fold(true, |ok, result| result.apply(player, None) && ok)
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("id", &self.id)
            .field("optional", &self.optional)
            .field("auto_complete", &self.auto_complete)
            .field("condition", &self.condition.to_string())
            .field("results", &self.results.len())
            .finish()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.condition, f)
    }
}
