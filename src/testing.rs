//! In-memory fakes shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::FixedOffset;

use crate::config::{Config, TelemetryConfig};
use crate::error::{AppError, Result};
use crate::mail::{Email, MailTransport, Mailer, Recipients};
use crate::models::{ContactMessage, GuestbookEntry, RsvpRecord};
use crate::state::AppState;
use crate::store::Datastore;
use crate::telemetry::Telemetry;
use crate::variant::SiteVariant;

#[derive(Default)]
pub struct MemoryStore {
    fail: bool,
    rsvps: Mutex<Vec<RsvpRecord>>,
    guestbook: Mutex<Vec<GuestbookEntry>>,
    contact: Mutex<Vec<ContactMessage>>,
}

impl MemoryStore {
    /// Store whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_rsvps(records: Vec<RsvpRecord>) -> Self {
        Self {
            rsvps: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn rsvps(&self) -> Vec<RsvpRecord> {
        self.rsvps.lock().unwrap().clone()
    }

    pub fn guestbook(&self) -> Vec<GuestbookEntry> {
        self.guestbook.lock().unwrap().clone()
    }

    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.contact.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(AppError::Datastore("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<()> {
        self.check()?;
        self.rsvps.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_rsvps(&self) -> Result<Vec<RsvpRecord>> {
        self.check()?;
        Ok(self.rsvps())
    }

    async fn insert_guestbook_entry(&self, entry: &GuestbookEntry) -> Result<()> {
        self.check()?;
        self.guestbook.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_guestbook_entries(&self, limit: usize) -> Result<Vec<GuestbookEntry>> {
        self.check()?;
        Ok(self.guestbook().into_iter().rev().take(limit).collect())
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<()> {
        self.check()?;
        self.contact.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }
}

/// Transport that records what it was asked to send
#[derive(Default)]
pub struct RecordingTransport {
    fail_for: Option<String>,
    fail_all: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<Email>>,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Fail only deliveries addressed to `recipient`
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            fail_for: Some(recipient.to_string()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &Email) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let rejected = self.fail_all
            || self
                .fail_for
                .as_ref()
                .is_some_and(|addr| email.to.contains(addr));
        if rejected {
            return Err(AppError::Mail("mailbox unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub fn test_config(admin_recipients: &str) -> Config {
    Config {
        server_host: "localhost".to_string(),
        server_port: 3000,
        redis_url: "redis://localhost".to_string(),
        site_variant: SiteVariant::Zero,
        resend_api_key: None,
        mail_from: "Athira & Gowtham <hello@example.com>".to_string(),
        admin_recipients: Recipients::parse(admin_recipients),
        attendance_override: None,
        admin_password: Some("open-sesame".to_string()),
        report_offset: FixedOffset::east_opt(330 * 60).unwrap(),
        telemetry: TelemetryConfig::default(),
    }
}

pub fn state_with_config(
    config: Config,
    store: Arc<MemoryStore>,
    transport: Arc<RecordingTransport>,
) -> AppState {
    state_with_telemetry(config, store, transport, Arc::new(Telemetry::disabled()))
}

pub fn state_with_telemetry(
    config: Config,
    store: Arc<MemoryStore>,
    transport: Arc<RecordingTransport>,
    telemetry: Arc<Telemetry>,
) -> AppState {
    let mailer = Mailer::new(transport, config.mail_from.clone());
    AppState::new(config, store, mailer, telemetry)
}

pub fn test_state(
    store: Arc<MemoryStore>,
    transport: Arc<RecordingTransport>,
    admin_recipients: &str,
) -> AppState {
    state_with_config(test_config(admin_recipients), store, transport)
}
