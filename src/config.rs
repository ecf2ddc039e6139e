use std::env;

use chrono::FixedOffset;

use crate::mail::Recipients;
use crate::models::AttendanceCode;
use crate::variant::SiteVariant;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub redis_url: String,
    pub site_variant: SiteVariant,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub admin_recipients: Recipients,
    pub attendance_override: Option<AttendanceCode>,
    pub admin_password: Option<String>,
    pub report_offset: FixedOffset,
    pub telemetry: TelemetryConfig,
}

/// Optional sinks for log shipping and error reporting
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_sink_url: Option<String>,
    pub error_sink_url: Option<String>,
    pub flush_interval_secs: u64,
    pub batch_size: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_sink_url: None,
            error_sink_url: None,
            flush_interval_secs: 5,
            batch_size: 50,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, applying defaults for
    /// unset keys. Blank values count as unset for optional settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let attendance_override = match non_empty("ATTENDANCE_OVERRIDE") {
            Some(raw) => Some(
                AttendanceCode::from_code(raw.trim())
                    .ok_or(ConfigError::InvalidAttendanceOverride(raw))?,
            ),
            None => None,
        };

        let offset_minutes: i32 = var("REPORT_UTC_OFFSET_MINUTES", "330")
            .parse()
            .map_err(|_| ConfigError::InvalidNumber("REPORT_UTC_OFFSET_MINUTES"))?;
        let report_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidNumber("REPORT_UTC_OFFSET_MINUTES"))?;

        Ok(Config {
            server_host: var("SERVER_HOST", "0.0.0.0"),
            server_port: var("SERVER_PORT", "3000")
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            redis_url: var("REDIS_URL", "redis://localhost:6379"),
            site_variant: SiteVariant::parse(&var("ENV_TYPE", "")),
            resend_api_key: non_empty("RESEND_API_KEY"),
            mail_from: var("MAIL_FROM", "Athira & Gowtham <onboarding@resend.dev>"),
            admin_recipients: Recipients::parse(&var("RECIPIENT_EMAIL", "")),
            attendance_override,
            admin_password: non_empty("ADMIN_PASSWORD"),
            report_offset,
            telemetry: TelemetryConfig {
                log_sink_url: non_empty("LOG_SINK_URL"),
                error_sink_url: non_empty("ERROR_SINK_URL"),
                flush_interval_secs: var("LOG_FLUSH_INTERVAL_SECS", "5")
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("LOG_FLUSH_INTERVAL_SECS"))?,
                batch_size: var("LOG_BATCH_SIZE", "50")
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("LOG_BATCH_SIZE"))?,
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    #[error("ATTENDANCE_OVERRIDE must be 0, 1 or 2, got {0:?}")]
    InvalidAttendanceOverride(String),
}
