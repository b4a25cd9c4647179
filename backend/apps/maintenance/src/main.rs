//! Maintenance Entry Point
//!
//! Opens the play time stores, re-keys legacy name records, archives inactive
//! players and prints the configured rank ladder.
//! Uses `anyhow` for startup errors, but store errors are
//! `progression::RankupError` and convert to `kernel::error::AppError`.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use kernel::error::app_error::AppError;
use progression::application::PlaytimeStore;
use progression::application::ladder::LadderDefinition;
use progression::domain::effect::{Notifier, RankBackend};
use progression::domain::entity::player::Player;
use progression::domain::repository::ProgressRepository;
use progression::domain::value_object::{Minutes, PlayerId};
use progression::infra::external::NoExternalSource;
use progression::store::{IdentityStore, ProgressStore};
use progression::{
    GlobalTimeBackend, JsonPlaytimeRepository, PgGlobalTimeRepository, RankupConfig,
    TimeSourceKind,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Rank backend for diagnostics: reports no groups and changes nothing
struct DryRun;

impl RankBackend for DryRun {
    fn primary_group(&self, _player: &PlayerId) -> Option<String> {
        None
    }

    fn change_group(&self, player: &PlayerId, from: &str, to: &str) -> bool {
        tracing::info!(player_id = %player, from, to, "Dry run: group change skipped");
        false
    }
}

impl Notifier for DryRun {
    fn notify(&self, player: &Player, message: &str) -> bool {
        tracing::info!(player = %player.player_name, message, "Dry run: message skipped");
        true
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_config() -> anyhow::Result<RankupConfig> {
    let mut config = match env_opt("RANKUP_INTERVAL_MINUTES") {
        Some(minutes) => RankupConfig::with_interval_minutes(
            minutes
                .trim()
                .parse()
                .context("RANKUP_INTERVAL_MINUTES must be a number of minutes")?,
        ),
        None => RankupConfig::default(),
    };

    if let Some(code) = env_opt("RANKUP_TIME_SOURCE") {
        config.time_source = TimeSourceKind::from_code(&code)
            .with_context(|| format!("Unknown RANKUP_TIME_SOURCE '{code}'"))?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maintenance=info,progression=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let data_dir = PathBuf::from(env_opt("RANKUP_DATA_DIR").unwrap_or_else(|| "data".to_string()));

    tracing::info!(
        data_dir = %data_dir.display(),
        time_source = config.time_source.code(),
        interval_minutes = %config.interval_minutes(),
        "Starting play time maintenance"
    );

    // Global play time database (optional)
    let global = match env_opt("GLOBAL_TIME_DATABASE_URL") {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to global time database");

            let repo = PgGlobalTimeRepository::new(pool);
            repo.ensure_schema().await.map_err(AppError::from)?;
            GlobalTimeBackend::Postgres(repo)
        }
        None => {
            tracing::info!("Global play time disabled");
            GlobalTimeBackend::Disabled
        }
    };

    // Local stores
    let local = Arc::new(JsonPlaytimeRepository::new(data_dir.join("playtime.json")));
    let identities = Arc::new(
        IdentityStore::open(data_dir.join("identities.json"))
            .await
            .map_err(AppError::from)?,
    );
    let progress = ProgressStore::new(data_dir.join("progress.json"));
    progress.reload().await.map_err(AppError::from)?;

    let store = PlaytimeStore::new(
        local,
        Arc::new(global),
        identities,
        Arc::new(NoExternalSource),
        &config,
    );
    store.reload().await.map_err(AppError::from)?;

    // Maintenance: errors here are reported but do not stop the remaining steps
    match store.migrate_identity_keys().await {
        Ok(migrated) => tracing::info!(migrated, "Identity migration completed"),
        Err(e) => {
            e.log();
            let err = AppError::from(e);
            tracing::warn!(transient = err.is_transient(), "Identity migration failed, continuing anyway");
        }
    }

    if let Some(minimum) = env_opt("RANKUP_ARCHIVE_MINIMUM") {
        let minimum: u32 = minimum
            .trim()
            .parse()
            .context("RANKUP_ARCHIVE_MINIMUM must be a number of minutes")?;

        match store.archive(Minutes::new(minimum)).await {
            Ok(archived) => tracing::info!(archived, "Archive completed"),
            Err(e) => {
                e.log();
                let err = AppError::from(e);
                tracing::warn!(transient = err.is_transient(), "Archive failed, continuing anyway");
            }
        }
    }

    // Ladder diagnostics
    if let Some(path) = env_opt("RANKUP_LADDER") {
        let dry_run = Arc::new(DryRun);
        let ladder = LadderDefinition::load(&path)
            .await
            .and_then(|definition| definition.build(dry_run.clone(), dry_run))
            .map_err(AppError::from)
            .with_context(|| format!("Failed to load ladder from {path}"))?;

        tracing::info!(ranks = ladder.len(), "Loaded rank ladder");
        for change in &ladder {
            tracing::info!(rank_change = %change, "Rank change");
        }
    }

    store.save().await.map_err(AppError::from)?;
    progress.save().await.map_err(AppError::from)?;

    tracing::info!("Maintenance finished");
    Ok(())
}
