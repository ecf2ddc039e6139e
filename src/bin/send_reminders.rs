//! Cron entry point: send every guest a reminder with their event details.

use wedding_rsvp::config::Config;
use wedding_rsvp::jobs::send_reminders;
use wedding_rsvp::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let state = build_state(Config::from_env()?)?;

    let result = send_reminders(&state).await;
    if let Err(e) = &result {
        state
            .telemetry
            .capture_error("reminders", e, serde_json::Map::new())
            .await;
    }
    state.telemetry.flush().await;

    let summary = result?;
    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "Some reminders could not be delivered");
    }
    Ok(())
}
