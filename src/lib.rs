pub mod api;
pub mod compose;
pub mod config;
pub mod error;
pub mod intake;
pub mod jobs;
pub mod mail;
pub mod models;
pub mod security;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod variant;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mail::Mailer;
use store::{create_pool, RedisStore};
use telemetry::Telemetry;

/// Install the global tracing subscriber. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

/// Wire the Redis store, mailer and telemetry client from configuration
pub fn build_state(config: Config) -> Result<AppState> {
    let pool = create_pool(&config)?;
    let store = Arc::new(RedisStore::new(pool));
    let mailer = Mailer::from_config(&config);
    let telemetry = Arc::new(Telemetry::new(
        config.telemetry.clone(),
        config.site_variant,
    ));

    Ok(AppState::new(config, store, mailer, telemetry))
}
