//! Global play time backend selected at startup.

use crate::domain::repository::GlobalTimeRepository;
use crate::domain::value_object::{Minutes, PlayerId};
use crate::error::{RankupError, RankupResult};
use crate::infra::postgres::PgGlobalTimeRepository;

/// Either no remote store at all, or the shared database
#[derive(Clone, Default)]
pub enum GlobalTimeBackend {
    #[default]
    Disabled,
    Postgres(PgGlobalTimeRepository),
}

impl GlobalTimeRepository for GlobalTimeBackend {
    fn is_enabled(&self) -> bool {
        matches!(self, GlobalTimeBackend::Postgres(_))
    }

    async fn find(&self, player_id: &PlayerId) -> RankupResult<Option<Minutes>> {
        match self {
            GlobalTimeBackend::Disabled => Ok(None),
            GlobalTimeBackend::Postgres(repo) => repo.find(player_id).await,
        }
    }

    async fn upsert(&self, player_id: &PlayerId, minutes: Minutes) -> RankupResult<()> {
        match self {
            GlobalTimeBackend::Disabled => Err(RankupError::GlobalTimeDisabled),
            GlobalTimeBackend::Postgres(repo) => repo.upsert(player_id, minutes).await,
        }
    }

    async fn add(&self, player_id: &PlayerId, delta: i64) -> RankupResult<Minutes> {
        match self {
            GlobalTimeBackend::Disabled => Err(RankupError::GlobalTimeDisabled),
            GlobalTimeBackend::Postgres(repo) => repo.add(player_id, delta).await,
        }
    }
}
