use chrono::Utc;
use dioxus_logger::tracing;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, state::AppState};

/// Starts the Reiatsu spawn scheduler
///
/// Runs a spawn tick every `spawn_loop_interval` seconds. A failing tick is logged and the
/// next one runs as usual.
///
/// # Arguments
/// - `state`: Shared application state
pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;
    let interval = Duration::from_secs(state.game_config.spawn_loop_interval);

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = state.spawn_service().tick(Utc::now()).await {
                tracing::error!("Error running Reiatsu spawn tick: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Reiatsu spawn scheduler started ({}s interval)",
        interval.as_secs()
    );

    Ok(())
}
