//! Placeholder time source for deployments without a statistics or
//! time-tracking plugin.

use crate::domain::repository::ExternalTimeSource;
use crate::domain::value_object::{Minutes, PlayerName};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalSource;

impl ExternalTimeSource for NoExternalSource {
    async fn play_time(&self, _name: &PlayerName) -> Option<Minutes> {
        None
    }
}
