//! Accounting Use Case
//!
//! Periodic work driven by timers: crediting play time to online players,
//! evaluating their rank changes, and autosaving the local stores. The tasks
//! run on the tokio runtime so remote store calls never block the host's game
//! loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::config::RankupConfig;
use crate::application::evaluate_player::{EvaluatePlayerUseCase, Evaluation};
use crate::application::playtime_store::PlaytimeStore;
use crate::domain::repository::{
    ExternalTimeSource, GlobalTimeRepository, IdentityResolver, OnlineRoster, PlaytimeRepository,
    ProgressRepository,
};
use crate::domain::value_object::{Minutes, PlayerName};

/// Tick report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Players whose local time was credited
    pub credited: usize,
    /// Players promoted during this tick
    pub promoted: usize,
    /// Players skipped because of an error
    pub failed: usize,
}

/// Accounting tick use case
pub struct AccountingUseCase<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    evaluator: Arc<EvaluatePlayerUseCase<L, G, I, X>>,
    minutes_per_tick: Minutes,
}

impl<L, G, I, X> AccountingUseCase<L, G, I, X>
where
    L: PlaytimeRepository,
    G: GlobalTimeRepository,
    I: IdentityResolver,
    X: ExternalTimeSource,
{
    pub fn new(evaluator: Arc<EvaluatePlayerUseCase<L, G, I, X>>, minutes_per_tick: Minutes) -> Self {
        Self {
            evaluator,
            minutes_per_tick,
        }
    }

    fn store(&self) -> &PlaytimeStore<L, G, I, X> {
        self.evaluator.store()
    }

    /// Credit and evaluate every online player
    ///
    /// Failures are scoped to one player and never abort the tick.
    pub async fn run_tick(&self, online: &[PlayerName]) -> TickReport {
        let mut report = TickReport::default();

        for name in online {
            if let Err(e) = self
                .store()
                .credit_local_time(name, self.minutes_per_tick)
                .await
            {
                tracing::warn!(player = %name, error = %e, "Crediting local play time failed");
                report.failed += 1;
                continue;
            }
            report.credited += 1;

            if self.store().is_global_enabled() {
                let delta = i64::from(self.minutes_per_tick);
                if let Err(e) = self.store().modify_global_time(name, delta).await {
                    e.log();
                    tracing::warn!(player = %name, "Crediting global play time failed");
                }
            }

            match self.evaluator.execute(name).await {
                Ok(Evaluation::Promoted { .. }) => report.promoted += 1,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(player = %name, error = %e, "Rank evaluation failed");
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            credited = report.credited,
            promoted = report.promoted,
            failed = report.failed,
            "Accounting tick finished"
        );

        report
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    // interval_at skips the immediate first tick of a plain interval.
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Run accounting ticks every `period` until the task is aborted
pub fn spawn_accounting<L, G, I, X, R>(
    use_case: Arc<AccountingUseCase<L, G, I, X>>,
    roster: Arc<R>,
    period: Duration,
) -> JoinHandle<()>
where
    L: PlaytimeRepository + Send + Sync + 'static,
    G: GlobalTimeRepository + Send + Sync + 'static,
    I: IdentityResolver + Send + Sync + 'static,
    X: ExternalTimeSource + Send + Sync + 'static,
    R: OnlineRoster + 'static,
{
    tracing::info!(interval_secs = period.as_secs(), "Accounting scheduled");

    tokio::spawn(async move {
        let mut ticker = ticker(period);
        loop {
            ticker.tick().await;
            let online = roster.online_players();
            use_case.run_tick(&online).await;
        }
    })
}

/// Save the local play time store and progress every `save_interval`
pub fn spawn_autosave<L, G, I, X, P>(
    store: Arc<PlaytimeStore<L, G, I, X>>,
    progress: Arc<P>,
    config: &RankupConfig,
) -> JoinHandle<()>
where
    L: PlaytimeRepository + Send + Sync + 'static,
    G: GlobalTimeRepository + Send + Sync + 'static,
    I: IdentityResolver + Send + Sync + 'static,
    X: ExternalTimeSource + Send + Sync + 'static,
    P: ProgressRepository + Sync + 'static,
{
    let period = config.save_interval;
    tracing::info!(interval_secs = period.as_secs(), "Autosave scheduled");

    tokio::spawn(async move {
        let mut ticker = ticker(period);
        loop {
            ticker.tick().await;
            if let Err(e) = store.save().await {
                e.log();
            }
            if let Err(e) = progress.save().await {
                e.log();
            }
        }
    })
}
