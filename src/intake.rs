//! RSVP intake: validate, persist, then notify the couple and the guest.
//!
//! Persisting is the only step that can fail the request. Emails are single
//! attempts whose failures are logged and swallowed.

use tracing::Level;

use crate::compose::notification::{compose_admin_alert, compose_guest_confirmation};
use crate::error::Result;
use crate::mail::Recipients;
use crate::models::{RsvpRecord, RsvpSubmission};
use crate::state::AppState;

/// What happened after an RSVP was stored
#[derive(Debug)]
pub struct IntakeOutcome {
    pub record: RsvpRecord,
    pub admin_notified: bool,
    pub guest_confirmed: bool,
}

pub async fn submit_rsvp(state: &AppState, submission: RsvpSubmission) -> Result<IntakeOutcome> {
    let record = submission.into_record(
        state.config.site_variant,
        state.config.attendance_override,
    )?;

    if let Err(e) = state.store.insert_rsvp(&record).await {
        state
            .telemetry
            .capture_error(
                "rsvp_persist",
                &e,
                crate::fields! { "name" => record.name, "email" => record.email },
            )
            .await;
        return Err(e);
    }

    tracing::info!(
        rsvp_id = %record.id,
        attending = %record.attending.code(),
        guests = record.num_guests,
        site_variant = %record.site_variant,
        "RSVP received"
    );
    state
        .telemetry
        .capture_event(
            "rsvp_submitted",
            crate::fields! {
                "attending" => record.attending.code(),
                "numGuests" => record.num_guests,
            },
        )
        .await;

    let admin_notified = notify_admins(state, &record).await;
    let guest_confirmed = confirm_guest(state, &record).await;

    Ok(IntakeOutcome {
        record,
        admin_notified,
        guest_confirmed,
    })
}

async fn notify_admins(state: &AppState, record: &RsvpRecord) -> bool {
    let recipients = &state.config.admin_recipients;
    if recipients.is_empty() {
        return false;
    }

    let email = compose_admin_alert(record, &state.config.report_offset);
    match state.mailer.send(recipients, email.subject, email.html).await {
        Ok(()) => true,
        Err(e) => {
            state
                .telemetry
                .log(
                    Level::ERROR,
                    "Failed to send admin RSVP alert",
                    crate::fields! {
                        "error" => e.to_string(),
                        "name" => record.name,
                        "email" => record.email,
                    },
                )
                .await;
            false
        }
    }
}

async fn confirm_guest(state: &AppState, record: &RsvpRecord) -> bool {
    let email = compose_guest_confirmation(record);
    match state
        .mailer
        .send(&Recipients::single(&record.email), email.subject, email.html)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            state
                .telemetry
                .log(
                    Level::ERROR,
                    "Failed to send RSVP confirmation",
                    crate::fields! {
                        "error" => e.to_string(),
                        "recipient" => record.email,
                        "name" => record.name,
                    },
                )
                .await;
            false
        }
    }
}
