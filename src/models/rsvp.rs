use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::variant::SiteVariant;

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 50;

/// Which events a guest said they will attend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttendanceCode {
    /// "0": wedding ceremony only
    CeremonyOnly,
    /// "1": soirée and wedding ceremony
    Both,
    /// "2": soirée only
    EveningOnly,
}

impl AttendanceCode {
    /// Map a raw form value onto a code.
    ///
    /// Legacy yes/no answers from the first version of the form map to
    /// `Both`/`CeremonyOnly`; anything unrecognised counts as `Both`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => AttendanceCode::Both,
            "no" => AttendanceCode::CeremonyOnly,
            other => AttendanceCode::from_code(other).unwrap_or(AttendanceCode::Both),
        }
    }

    /// Strict parse of a stored code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(AttendanceCode::CeremonyOnly),
            "1" => Some(AttendanceCode::Both),
            "2" => Some(AttendanceCode::EveningOnly),
            _ => None,
        }
    }

    /// Single-event deployments force every answer to one code.
    pub fn with_override(self, forced: Option<AttendanceCode>) -> Self {
        forced.unwrap_or(self)
    }

    pub fn code(self) -> &'static str {
        match self {
            AttendanceCode::CeremonyOnly => "0",
            AttendanceCode::Both => "1",
            AttendanceCode::EveningOnly => "2",
        }
    }

    /// Label used in admin-facing tables
    pub fn label(self) -> &'static str {
        match self {
            AttendanceCode::CeremonyOnly => "Wedding ceremony only",
            AttendanceCode::Both => "Soirée and wedding ceremony",
            AttendanceCode::EveningOnly => "Soirée only",
        }
    }

    /// Phrase used in guest-facing emails: "joining us for ..."
    pub fn phrase(self) -> &'static str {
        match self {
            AttendanceCode::CeremonyOnly => "the wedding ceremony",
            AttendanceCode::Both => "both the soirée and wedding ceremony",
            AttendanceCode::EveningOnly => "the soirée",
        }
    }
}

impl Serialize for AttendanceCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for AttendanceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = FieldValue::deserialize(deserializer)?;
        Ok(AttendanceCode::normalize(&raw.into_text()))
    }
}

/// A scalar that may arrive as a JSON number or as form text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

/// Raw RSVP form, form-encoded or JSON
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub attending: Option<FieldValue>,
    #[serde(default)]
    pub num_guests: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Number of guests must be a whole number, got {0:?}")]
    InvalidGuestCount(String),
    #[error("Number of guests must be between 1 and 50, got {0}")]
    GuestCountOutOfRange(i64),
    #[error("Message is required")]
    MissingMessage,
    #[error("Message must be at most {0} characters")]
    MessageTooLong(usize),
}

impl RsvpSubmission {
    /// Validate the submission and build the record to persist.
    ///
    /// All defaults (guest count, variant, timestamp) are applied here and
    /// nowhere else.
    pub fn into_record(
        self,
        site_variant: SiteVariant,
        attendance_override: Option<AttendanceCode>,
    ) -> Result<RsvpRecord, ValidationError> {
        let name = required(self.name).ok_or(ValidationError::MissingName)?;
        let email = required(self.email).ok_or(ValidationError::MissingEmail)?;
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        let attending = self
            .attending
            .map(|raw| AttendanceCode::normalize(&raw.into_text()))
            .unwrap_or(AttendanceCode::Both)
            .with_override(attendance_override);

        let num_guests = parse_guest_count(self.num_guests)?;

        Ok(RsvpRecord {
            id: Uuid::new_v4(),
            name,
            email,
            attending,
            num_guests,
            site_variant,
            created_at: Utc::now(),
        })
    }
}

pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_guest_count(raw: Option<FieldValue>) -> Result<u32, ValidationError> {
    let count = match raw {
        None => return Ok(MIN_GUESTS),
        Some(FieldValue::Int(n)) => n,
        Some(FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(MIN_GUESTS);
            }
            text.parse::<i64>()
                .map_err(|_| ValidationError::InvalidGuestCount(text.to_string()))?
        }
    };

    if count < MIN_GUESTS as i64 || count > MAX_GUESTS as i64 {
        return Err(ValidationError::GuestCountOutOfRange(count));
    }
    Ok(count as u32)
}

fn default_guest_count() -> u32 {
    MIN_GUESTS
}

fn default_attendance() -> AttendanceCode {
    AttendanceCode::Both
}

/// A persisted RSVP. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default = "default_attendance")]
    pub attending: AttendanceCode,
    #[serde(default = "default_guest_count")]
    pub num_guests: u32,
    #[serde(default, alias = "envType")]
    pub site_variant: SiteVariant,
    pub created_at: DateTime<Utc>,
}

/// Response body of the intake endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RsvpResponse {
    pub success: bool,
    pub message: String,
}
