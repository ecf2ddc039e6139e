use axum::{extract::State, routing::post, Json, Router};
use tracing::Level;

use super::extract::FormOrJson;
use crate::compose::notification::compose_contact_alert;
use crate::error::Result;
use crate::models::{ContactSubmission, RsvpResponse};
use crate::state::AppState;

/// Contact form routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(create_message))
}

/// POST /api/contact - Store a message and forward it to the couple
async fn create_message(
    State(state): State<AppState>,
    FormOrJson(submission): FormOrJson<ContactSubmission>,
) -> Result<Json<RsvpResponse>> {
    let message = submission.into_message()?;
    state.store.insert_contact_message(&message).await?;

    tracing::info!(message_id = %message.id, "Contact message received");

    if !state.config.admin_recipients.is_empty() {
        let email = compose_contact_alert(&message, &state.config.report_offset);
        if let Err(e) = state
            .mailer
            .send(&state.config.admin_recipients, email.subject, email.html)
            .await
        {
            state
                .telemetry
                .log(
                    Level::ERROR,
                    "Failed to forward contact message",
                    crate::fields! { "error" => e.to_string(), "name" => message.name },
                )
                .await;
        }
    }

    Ok(Json(RsvpResponse {
        success: true,
        message: "Message sent successfully!".to_string(),
    }))
}
