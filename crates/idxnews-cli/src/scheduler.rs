//! Daemon mode: recurring per-tier ingestion jobs.
//!
//! Trigger times are defined in WIB (UTC+7) and converted to UTC cron
//! expressions here, since the scheduler runs on UTC. All jobs share one
//! browser session behind a mutex, so tier runs serialize instead of
//! hammering the render endpoint concurrently.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use idxnews_core::schedule::{trigger_times, WIB_UTC_OFFSET_HOURS};
use idxnews_core::{AppConfig, RelevanceFilter, Tier};
use idxnews_db::NewsStore;
use idxnews_scraper::{run_tier, BrowserlessSession};

type SharedSession = Arc<Mutex<BrowserlessSession>>;

/// Builds and starts the background job scheduler.
///
/// Registers one job per (tier, trigger time) pair and starts the
/// scheduler. The returned handle must be kept alive for the lifetime of
/// the process; shutting it down stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    session: SharedSession,
    store: Arc<NewsStore>,
    filter: Arc<RelevanceFilter>,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    for tier in [Tier::Hot, Tier::Active, Tier::Cold] {
        for time in trigger_times(tier) {
            register_tier_job(
                &scheduler,
                tier,
                time,
                Arc::clone(&session),
                Arc::clone(&store),
                Arc::clone(&filter),
                Arc::clone(&config),
            )
            .await?;
        }
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_tier_job(
    scheduler: &JobScheduler,
    tier: Tier,
    wib_time: &str,
    session: SharedSession,
    store: Arc<NewsStore>,
    filter: Arc<RelevanceFilter>,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let Some(cron) = wib_to_utc_cron(wib_time) else {
        tracing::error!(%tier, time = wib_time, "malformed trigger time; job not registered");
        return Ok(());
    };

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let session = Arc::clone(&session);
        let store = Arc::clone(&store);
        let filter = Arc::clone(&filter);
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!(%tier, "scheduler: starting tier run");
            let mut page = session.lock().await;
            let count = run_tier(&mut *page, store.as_ref(), &filter, &config, tier).await;
            tracing::info!(%tier, new_articles = count, "scheduler: tier run complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Convert a WIB `HH:MM` wall-clock time to a daily UTC cron expression.
///
/// WIB has no daylight saving, so the conversion is a fixed hour shift.
fn wib_to_utc_cron(wib: &str) -> Option<String> {
    let (h, m) = wib.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h >= 24 || m >= 60 {
        return None;
    }
    let utc_hour = (h + 24 - WIB_UTC_OFFSET_HOURS) % 24;
    Some(format!("0 {m} {utc_hour} * * *"))
}
