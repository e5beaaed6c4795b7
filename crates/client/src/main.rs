//! Waterbot client binary.
//!
//! Composition root: loads a farm and the bot tuning, builds the runtime,
//! switches the agent on and runs it until it halts.
//!
//! # Examples
//!
//! ```bash
//! # Embedded homestead farm with the default tuning
//! cargo run -p waterbot-client
//!
//! # Custom farm and tuning
//! WATERBOT_FARM=farm.ron WATERBOT_CONFIG=bot.toml cargo run -p waterbot-client
//! ```

mod config;
mod logging;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;

use runtime::{Event, Runtime, RuntimeConfig, Topic};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&client_config.session_id)?;

    tracing::info!("Starting waterbot");
    tracing::info!("Farm: {:?}", client_config.farm);
    tracing::info!("Tick budget: {}", client_config.max_ticks);

    let farm = client_config.load_farm()?;
    let bot = client_config.load_bot_config()?;

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            bot,
            ..RuntimeConfig::default()
        })
        .farm(farm)
        .build()
        .await?;
    tracing::info!("Runtime built successfully");

    let handle = runtime.handle();
    let notices = tokio::spawn(log_notices(handle.subscribe(Topic::Notice)));

    let before = handle.query_farm().await?;
    tracing::info!(
        "Farm before:\n{}",
        before.render(Some(handle.query_status().await?.position.tile()))
    );

    handle.set_active(true).await?;
    let outcome = handle.run_until_halt(client_config.max_ticks).await;

    match &outcome {
        Ok(summary) => {
            let status = summary.status;
            tracing::info!(
                reason = summary.reason.code(),
                ticks = summary.ticks,
                charge = status.charge,
                capacity = status.capacity,
                dry_plots = status.dry_plots,
                "Waterbot halted: {}",
                summary.reason
            );
            let after = handle.query_farm().await?;
            tracing::info!(
                "Farm after ({} watered):\n{}",
                after.watered_plots(),
                after.render(Some(status.position.tile()))
            );
        }
        Err(e) => tracing::error!("Run failed: {}", e),
    }

    drop(handle);
    runtime.shutdown().await?;
    if notices.await.is_err() {
        tracing::debug!("Notice logger task aborted");
    }

    tracing::info!("Client shutdown complete");
    outcome.map(|_| ()).map_err(Into::into)
}

async fn log_notices(mut notices: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match notices.recv().await {
            Ok(Event::Notice(notice)) => {
                tracing::info!(tick = notice.tick, "Notice: {}", notice.notice.message);
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Notice log skipped {} messages", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
