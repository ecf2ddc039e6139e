use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Email, MailTransport};
use crate::error::{AppError, Result};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Transactional mail through the Resend HTTP API
#[derive(Clone)]
pub struct ResendTransport {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendTransport {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl MailTransport for ResendTransport {
    async fn send(&self, email: &Email) -> Result<()> {
        let payload = Payload {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Mail send failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!(
                "Resend API error ({}): {}",
                status, body
            )));
        }

        Ok(())
    }
}
