use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rsvp::{required, ValidationError};

pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Guestbook entry shown on the website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuestbookSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

impl GuestbookSubmission {
    pub fn into_entry(self) -> Result<GuestbookEntry, ValidationError> {
        let name = required(self.name).ok_or(ValidationError::MissingName)?;
        let message = checked_message(self.message)?;

        Ok(GuestbookEntry {
            id: Uuid::new_v4(),
            name,
            message,
            style: required(self.style),
            created_at: Utc::now(),
        })
    }
}

/// Message left through the contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

impl ContactSubmission {
    pub fn into_message(self) -> Result<ContactMessage, ValidationError> {
        let name = required(self.name).ok_or(ValidationError::MissingName)?;
        let email = required(self.email);
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(ValidationError::InvalidEmail);
        }
        let message = checked_message(self.message)?;

        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            style: required(self.style),
            created_at: Utc::now(),
        })
    }
}

fn checked_message(message: Option<String>) -> Result<String, ValidationError> {
    let message = required(message).ok_or(ValidationError::MissingMessage)?;
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong(MAX_MESSAGE_CHARS));
    }
    Ok(message)
}
