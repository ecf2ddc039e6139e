use std::sync::Arc;

use crate::config::Config;
use crate::mail::Mailer;
use crate::store::Datastore;
use crate::telemetry::Telemetry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Datastore>,
    pub mailer: Arc<Mailer>,
    pub telemetry: Arc<Telemetry>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn Datastore>,
        mailer: Mailer,
        telemetry: Arc<Telemetry>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            mailer: Arc::new(mailer),
            telemetry,
        }
    }
}
