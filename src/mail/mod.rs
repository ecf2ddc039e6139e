pub mod resend;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{AppError, Result};

pub use resend::ResendTransport;

/// A composed HTML email ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Outbound mail transport. One call is one delivery attempt.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &Email) -> Result<()>;
}

/// Recipient list with blanks removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Split a comma-separated list, trimming entries and dropping empty ones.
    pub fn parse(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|addr| !addr.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// One address; blank input gives an empty list
    pub fn single(addr: &str) -> Self {
        let addr = addr.trim();
        if addr.is_empty() {
            Self::default()
        } else {
            Self(vec![addr.to_string()])
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Notification dispatcher: stamps the sender address and hands the email to
/// the configured transport.
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    from: String,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, from: impl Into<String>) -> Self {
        Self {
            transport,
            from: from.into(),
        }
    }

    /// Resend when an API key is configured, otherwise log-only delivery.
    pub fn from_config(config: &Config) -> Self {
        let transport: Arc<dyn MailTransport> = match &config.resend_api_key {
            Some(key) => Arc::new(ResendTransport::new(key.clone())),
            None => {
                tracing::warn!("RESEND_API_KEY not set, emails will only be logged");
                Arc::new(LogTransport)
            }
        };
        Self::new(transport, config.mail_from.clone())
    }

    pub async fn send(
        &self,
        to: &Recipients,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Result<()> {
        if to.is_empty() {
            return Err(AppError::Mail("No recipients".to_string()));
        }

        let email = Email {
            from: self.from.clone(),
            to: to.as_slice().to_vec(),
            subject: subject.into(),
            html: html.into(),
        };

        self.transport.send(&email).await?;
        tracing::debug!(recipients = email.to.len(), subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Transport that only logs; used when no mail API key is configured
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: &Email) -> Result<()> {
        tracing::info!(
            to = ?email.to,
            subject = %email.subject,
            bytes = email.html.len(),
            "Mail delivery disabled, email logged"
        );
        Ok(())
    }
}
