//! Cron entry point: email the daily RSVP summary to the admins.

use wedding_rsvp::config::Config;
use wedding_rsvp::jobs::send_daily_report;
use wedding_rsvp::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let state = build_state(Config::from_env()?)?;

    let result = send_daily_report(&state).await;
    if let Err(e) = &result {
        state
            .telemetry
            .capture_error("daily_report", e, serde_json::Map::new())
            .await;
    }
    state.telemetry.flush().await;

    let count = result?;
    tracing::info!(rsvps = count, "Daily report job finished");
    Ok(())
}
