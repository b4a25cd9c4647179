//! PostgreSQL Global Play Time Repository

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repository::GlobalTimeRepository;
use crate::domain::value_object::{Minutes, PlayerId};
use crate::error::RankupResult;

/// Play time aggregated across every server sharing the database
#[derive(Clone)]
pub struct PgGlobalTimeRepository {
    pool: PgPool,
}

impl PgGlobalTimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table on first use
    pub async fn ensure_schema(&self) -> RankupResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS global_playtime (
                player_id UUID PRIMARY KEY,
                minutes BIGINT NOT NULL CHECK (minutes >= 0),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Global play time schema ready");
        Ok(())
    }

    async fn fetch(&self, player_id: &PlayerId) -> RankupResult<Option<GlobalPlaytimeRow>> {
        let row = sqlx::query_as::<_, GlobalPlaytimeRow>(
            r#"
            SELECT
                player_id,
                minutes
            FROM global_playtime
            WHERE player_id = $1
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

impl GlobalTimeRepository for PgGlobalTimeRepository {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn find(&self, player_id: &PlayerId) -> RankupResult<Option<Minutes>> {
        let row = self.fetch(player_id).await?;
        Ok(row.map(GlobalPlaytimeRow::into_minutes))
    }

    async fn upsert(&self, player_id: &PlayerId, minutes: Minutes) -> RankupResult<()> {
        sqlx::query(
            r#"
            INSERT INTO global_playtime (
                player_id,
                minutes,
                updated_at
            ) VALUES ($1, $2, $3)
            ON CONFLICT (player_id) DO UPDATE SET
                minutes = EXCLUDED.minutes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(player_id.as_uuid())
        .bind(i64::from(minutes))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!(player_id = %player_id, minutes = %minutes, "Stored global play time");
        Ok(())
    }

    async fn add(&self, player_id: &PlayerId, delta: i64) -> RankupResult<Minutes> {
        // Clamped to the range of `Minutes` inside the statement.
        let row = sqlx::query_as::<_, GlobalPlaytimeRow>(
            r#"
            INSERT INTO global_playtime (
                player_id,
                minutes,
                updated_at
            ) VALUES ($1, LEAST(GREATEST($2, 0), $3), $4)
            ON CONFLICT (player_id) DO UPDATE SET
                minutes = LEAST(GREATEST(global_playtime.minutes + $2, 0), $3),
                updated_at = EXCLUDED.updated_at
            RETURNING
                player_id,
                minutes
            "#,
        )
        .bind(player_id.as_uuid())
        .bind(delta)
        .bind(i64::from(u32::MAX))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let minutes = row.into_minutes();
        tracing::debug!(player_id = %player_id, delta, minutes = %minutes, "Adjusted global play time");
        Ok(minutes)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct GlobalPlaytimeRow {
    #[allow(dead_code)]
    player_id: Uuid,
    minutes: i64,
}

impl GlobalPlaytimeRow {
    fn into_minutes(self) -> Minutes {
        Minutes::from_delta(self.minutes)
    }
}
