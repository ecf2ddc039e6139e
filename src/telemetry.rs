//! Observability client: log shipping, error reports and analytics events.
//!
//! Everything goes to `tracing` first. When sinks are configured, log records
//! and events are batched in memory and shipped by a background task; error
//! reports are queued separately and wake that task at once. No caller ever
//! waits on a sink. A failed delivery is logged locally and the batch is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::{oneshot, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::Level;

use crate::config::TelemetryConfig;
use crate::variant::SiteVariant;

/// One shipped log line
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    pub env_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One error report, posted on its own to the error sink
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub timestamp: DateTime<Utc>,
    pub context: String,
    pub error: String,
    pub env_type: String,
    pub extra: Map<String, Value>,
}

pub struct Telemetry {
    client: Client,
    config: TelemetryConfig,
    env_type: SiteVariant,
    buffer: Mutex<Vec<LogRecord>>,
    errors: Mutex<Vec<ErrorReport>>,
    wake: Notify,
}

impl Telemetry {
    pub fn new(config: TelemetryConfig, env_type: SiteVariant) -> Self {
        Self {
            client: Client::new(),
            config,
            env_type,
            buffer: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            wake: Notify::new(),
        }
    }

    /// Client with no sinks; only emits `tracing` events
    pub fn disabled() -> Self {
        Self::new(TelemetryConfig::default(), SiteVariant::default())
    }

    fn ships_logs(&self) -> bool {
        self.config.log_sink_url.is_some()
    }

    pub async fn log(&self, level: Level, message: &str, fields: Map<String, Value>) {
        let fields_json = Value::Object(fields.clone());
        match level {
            Level::ERROR => tracing::error!(fields = %fields_json, "{}", message),
            Level::WARN => tracing::warn!(fields = %fields_json, "{}", message),
            Level::INFO => tracing::info!(fields = %fields_json, "{}", message),
            Level::DEBUG => tracing::debug!(fields = %fields_json, "{}", message),
            Level::TRACE => tracing::trace!(fields = %fields_json, "{}", message),
        }

        if self.ships_logs() {
            self.push(level.to_string().to_lowercase(), message, fields).await;
        }
    }

    /// Analytics event, shipped with the log batch
    pub async fn capture_event(&self, name: &str, properties: Map<String, Value>) {
        tracing::debug!(event = %name, "Analytics event");
        if self.ships_logs() {
            self.push("event".to_string(), name, properties).await;
        }
    }

    /// Report an error with the context that triggered it.
    ///
    /// The report is queued for the flush task; this never waits on the sink.
    pub async fn capture_error(
        &self,
        context: &str,
        error: &(dyn std::error::Error + Send + Sync),
        extra: Map<String, Value>,
    ) {
        let extra_json = Value::Object(extra.clone());
        tracing::error!(context = %context, error = %error, extra = %extra_json, "Error captured");

        if self.config.error_sink_url.is_none() {
            return;
        }

        self.errors.lock().await.push(ErrorReport {
            timestamp: Utc::now(),
            context: context.to_string(),
            error: error.to_string(),
            env_type: self.env_type.code().to_string(),
            extra,
        });
        self.wake.notify_one();
    }

    async fn push(&self, level: String, message: &str, fields: Map<String, Value>) {
        let len = {
            let mut buffer = self.buffer.lock().await;
            buffer.push(LogRecord {
                timestamp: Utc::now(),
                level,
                message: message.to_string(),
                env_type: self.env_type.code().to_string(),
                fields,
            });
            buffer.len()
        };

        if len >= self.config.batch_size.max(1) {
            self.wake.notify_one();
        }
    }

    /// Log records and error reports waiting for the next flush
    pub async fn pending(&self) -> usize {
        self.buffer.lock().await.len() + self.errors.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn buffered(&self) -> Vec<LogRecord> {
        self.buffer.lock().await.clone()
    }

    /// Ship everything queued so far. Returns the number of records and
    /// reports delivered.
    pub async fn flush(&self) -> usize {
        self.flush_errors().await + self.flush_logs().await
    }

    async fn flush_logs(&self) -> usize {
        let batch = std::mem::take(&mut *self.buffer.lock().await);
        if batch.is_empty() {
            return 0;
        }

        let Some(url) = self.config.log_sink_url.as_deref() else {
            return 0;
        };

        match self.post(url, &batch).await {
            Ok(()) => batch.len(),
            Err(e) => {
                tracing::warn!(error = %e, dropped = batch.len(), "Failed to ship log batch");
                0
            }
        }
    }

    async fn flush_errors(&self) -> usize {
        let reports = std::mem::take(&mut *self.errors.lock().await);
        let Some(url) = self.config.error_sink_url.as_deref() else {
            return 0;
        };

        let mut delivered = 0;
        for report in &reports {
            match self.post(url, report).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(error = %e, context = %report.context, "Failed to deliver error report")
                }
            }
        }
        delivered
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<(), reqwest::Error> {
        self.client
            .post(url)
            .timeout(Duration::from_secs(10))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Start the background flush loop.
    ///
    /// The loop flushes on every interval tick, whenever a batch fills up and
    /// whenever an error report is queued.
    /// Call [`FlushHandle::shutdown`] before exiting to ship the last batch.
    pub fn start(self: &Arc<Self>) -> FlushHandle {
        let telemetry = Arc::clone(self);
        let period = Duration::from_secs(self.config.flush_interval_secs.max(1));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        telemetry.flush().await;
                    }
                    _ = telemetry.wake.notified() => {
                        telemetry.flush().await;
                    }
                    _ = &mut shutdown_rx => {
                        let shipped = telemetry.flush().await;
                        tracing::debug!(shipped, "Telemetry flushed on shutdown");
                        break;
                    }
                }
            }
        });

        FlushHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to the background flush loop
pub struct FlushHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl FlushHandle {
    /// Stop the loop after a final flush
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Telemetry flush task failed");
        }
    }
}

/// Build a field map from `key => value` pairs
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = ::serde_json::Map::new();
        $( map.insert($key.to_string(), ::serde_json::json!($value)); )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_config(url: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_sink_url: Some(url.to_string()),
            error_sink_url: Some(url.to_string()),
            flush_interval_secs: 3600,
            batch_size: 100,
        }
    }

    #[tokio::test]
    async fn test_disabled_client_buffers_nothing() {
        let telemetry = Telemetry::disabled();
        telemetry
            .log(Level::INFO, "Request metrics", fields! { "path" => "/api/rsvp" })
            .await;
        telemetry.capture_event("rsvp_submitted", Map::new()).await;

        assert_eq!(telemetry.pending().await, 0);
        assert_eq!(telemetry.flush().await, 0);
    }

    #[tokio::test]
    async fn test_failed_flush_drops_batch_without_panicking() {
        // Nothing listens on the discard port.
        let telemetry = Telemetry::new(sink_config("http://127.0.0.1:9/logs"), SiteVariant::One);
        telemetry.log(Level::WARN, "first", Map::new()).await;
        telemetry.capture_event("second", Map::new()).await;
        assert_eq!(telemetry.pending().await, 2);

        assert_eq!(telemetry.flush().await, 0);
        assert_eq!(telemetry.pending().await, 0);
    }

    #[tokio::test]
    async fn test_shutdown_drains_buffer() {
        let telemetry = Arc::new(Telemetry::new(
            sink_config("http://127.0.0.1:9/logs"),
            SiteVariant::Zero,
        ));
        let handle = telemetry.start();

        telemetry.log(Level::INFO, "pending", Map::new()).await;
        handle.shutdown().await;

        assert_eq!(telemetry.pending().await, 0);
    }

    #[tokio::test]
    async fn test_capture_error_queues_instead_of_posting() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/errors", listener.local_addr().unwrap());
        let telemetry = Telemetry::new(
            TelemetryConfig {
                error_sink_url: Some(url),
                ..TelemetryConfig::default()
            },
            SiteVariant::Zero,
        );
        let err = std::io::Error::other("boom");

        let started = std::time::Instant::now();
        telemetry
            .capture_error("rsvp_persist", &err, fields! { "name" => "Asha" })
            .await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(telemetry.pending().await, 1);
    }

    #[tokio::test]
    async fn test_error_reports_dropped_without_sink() {
        let telemetry = Telemetry::disabled();
        let err = std::io::Error::other("boom");
        telemetry.capture_error("daily_report", &err, Map::new()).await;
        assert_eq!(telemetry.pending().await, 0);
    }

    #[test]
    fn test_log_record_flattens_fields() {
        let record = LogRecord {
            timestamp: Utc::now(),
            level: "info".to_string(),
            message: "Request metrics".to_string(),
            env_type: "2".to_string(),
            fields: fields! { "statusCode" => 200, "path" => "/health" },
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["env_type"], "2");
        assert_eq!(json["path"], "/health");
    }
}
