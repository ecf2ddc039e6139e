//! Batch mailings run from cron: the daily admin report and guest reminders.

use chrono::Utc;
use tracing::Level;

use crate::compose::reminder::compose_reminder;
use crate::compose::report::{compose_report, random_sign_off, report_subject};
use crate::error::Result;
use crate::mail::Recipients;
use crate::state::AppState;

/// Email the RSVP summary to the configured admins.
///
/// Returns the number of RSVPs included. Unlike the intake flow, a send
/// failure here is returned to the caller.
pub async fn send_daily_report(state: &AppState) -> Result<usize> {
    let records = state.store.list_rsvps().await?;

    let now = Utc::now();
    let offset = &state.config.report_offset;
    let html = compose_report(&records, now, offset, random_sign_off());

    state
        .mailer
        .send(
            &state.config.admin_recipients,
            report_subject(now, offset),
            html,
        )
        .await?;

    tracing::info!(
        rsvps = records.len(),
        recipients = state.config.admin_recipients.len(),
        "Daily RSVP report sent"
    );
    Ok(records.len())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Send one reminder per stored RSVP, continuing past individual failures.
pub async fn send_reminders(state: &AppState) -> Result<ReminderSummary> {
    let records = state.store.list_rsvps().await?;
    let mut summary = ReminderSummary::default();

    if records.is_empty() {
        tracing::info!("No RSVPs found, no reminders to send");
        return Ok(summary);
    }

    for record in &records {
        let recipients = Recipients::single(&record.email);
        if recipients.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let email = compose_reminder(record);
        match state.mailer.send(&recipients, email.subject, email.html).await {
            Ok(()) => {
                tracing::info!(rsvp_id = %record.id, "Reminder sent");
                summary.sent += 1;
            }
            Err(e) => {
                state
                    .telemetry
                    .log(
                        Level::ERROR,
                        "Failed to send reminder",
                        crate::fields! {
                            "error" => e.to_string(),
                            "recipient" => record.email,
                            "name" => record.name,
                        },
                    )
                    .await;
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        sent = summary.sent,
        failed = summary.failed,
        skipped = summary.skipped,
        "All reminder emails processed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{AttendanceCode, RsvpRecord};
    use crate::testing::{test_state, MemoryStore, RecordingTransport};
    use crate::variant::SiteVariant;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use uuid::Uuid;

    fn record(name: &str, email: &str) -> RsvpRecord {
        RsvpRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            attending: AttendanceCode::Both,
            num_guests: 2,
            site_variant: SiteVariant::Zero,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_report_goes_to_all_admins() {
        let store = Arc::new(MemoryStore::with_rsvps(vec![
            record("Asha", "asha@x.com"),
            record("Bala", "bala@x.com"),
        ]));
        let transport = Arc::new(RecordingTransport::default());
        let state = test_state(store, transport.clone(), "a@x.com, , b@x.com,");

        let count = send_daily_report(&state).await.unwrap();

        assert_eq!(count, 2);
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["a@x.com".to_string(), "b@x.com".to_string()]);
        assert!(sent[0].subject.starts_with("Good Morning – Daily RSVP Summary"));
        assert!(sent[0].html.contains("<strong>Total Guests:</strong> 4"));
    }

    #[tokio::test]
    async fn test_empty_report_is_still_sent() {
        let transport = Arc::new(RecordingTransport::default());
        let state = test_state(Arc::new(MemoryStore::default()), transport.clone(), "a@x.com");

        assert_eq!(send_daily_report(&state).await.unwrap(), 0);
        assert!(transport.sent()[0].html.contains("There are no RSVPs yet"));
    }

    #[tokio::test]
    async fn test_report_without_admins_fails() {
        let state = test_state(
            Arc::new(MemoryStore::default()),
            Arc::new(RecordingTransport::default()),
            "",
        );
        assert!(matches!(send_daily_report(&state).await, Err(AppError::Mail(_))));
    }

    #[tokio::test]
    async fn test_reminders_continue_past_failures() {
        let store = Arc::new(MemoryStore::with_rsvps(vec![
            record("Asha", "asha@x.com"),
            record("Bala", "bounce@x.com"),
            record("Chitra", "  "),
            record("Dev", "dev@x.com"),
        ]));
        let transport = Arc::new(RecordingTransport::failing_for("bounce@x.com"));
        let state = test_state(store, transport.clone(), "");

        let summary = send_reminders(&state).await.unwrap();

        assert_eq!(
            summary,
            ReminderSummary {
                sent: 2,
                failed: 1,
                skipped: 1
            }
        );
        let recipients: Vec<String> = transport
            .sent()
            .into_iter()
            .flat_map(|email| email.to)
            .collect();
        assert_eq!(recipients, vec!["asha@x.com", "dev@x.com"]);
    }

    #[tokio::test]
    async fn test_reminders_with_no_rsvps() {
        let transport = Arc::new(RecordingTransport::default());
        let state = test_state(Arc::new(MemoryStore::default()), transport.clone(), "");

        let summary = send_reminders(&state).await.unwrap();

        assert_eq!(summary, ReminderSummary::default());
        assert_eq!(transport.attempts(), 0);
    }
}
