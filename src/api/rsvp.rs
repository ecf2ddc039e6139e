use axum::{extract::State, routing::post, Json, Router};

use super::extract::FormOrJson;
use crate::error::Result;
use crate::intake::submit_rsvp;
use crate::models::{RsvpResponse, RsvpSubmission};
use crate::state::AppState;

/// RSVP routes
pub fn rsvp_routes() -> Router<AppState> {
    Router::new().route("/", post(create_rsvp))
}

/// POST /api/rsvp - Record an RSVP and send the notification emails
pub(crate) async fn create_rsvp(
    State(state): State<AppState>,
    FormOrJson(submission): FormOrJson<RsvpSubmission>,
) -> Result<Json<RsvpResponse>> {
    let outcome = submit_rsvp(&state, submission).await?;

    let message = if outcome.guest_confirmed {
        "Thank you for your RSVP! A confirmation email is on its way."
    } else {
        "Thank you for your RSVP! We look forward to celebrating with you."
    };

    Ok(Json(RsvpResponse {
        success: true,
        message: message.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::models::{AttendanceCode, RsvpResponse};
    use crate::testing::{test_state, MemoryStore, RecordingTransport};

    async fn post(
        state: crate::state::AppState,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> (StatusCode, RsvpResponse) {
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_form_submission() {
        let store = Arc::new(MemoryStore::default());
        let transport = Arc::new(RecordingTransport::default());
        let state = test_state(store.clone(), transport.clone(), "admin@x.com");

        let (status, body) = post(
            state,
            "/submit-rsvp",
            "application/x-www-form-urlencoded",
            "name=Leela&email=leela%40example.com&attending=2&numGuests=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        let stored = store.rsvps();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].attending, AttendanceCode::EveningOnly);
        assert_eq!(stored[0].num_guests, 3);
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_json_submission_with_numbers() {
        let store = Arc::new(MemoryStore::default());
        let state = test_state(store.clone(), Arc::new(RecordingTransport::default()), "");

        let (status, body) = post(
            state,
            "/api/rsvp",
            "application/json",
            r#"{"name":"Leela","email":"leela@example.com","attending":0,"numGuests":5}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(store.rsvps()[0].attending, AttendanceCode::CeremonyOnly);
        assert_eq!(store.rsvps()[0].num_guests, 5);
    }

    #[tokio::test]
    async fn test_persistence_failure_returns_500() {
        let transport = Arc::new(RecordingTransport::default());
        let state = test_state(Arc::new(MemoryStore::failing()), transport.clone(), "admin@x.com");

        let (status, body) = post(
            state,
            "/api/rsvp",
            "application/json",
            r#"{"name":"Leela","email":"leela@example.com"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(transport.attempts(), 0);
    }

    #[tokio::test]
    async fn test_mail_failure_returns_success() {
        let store = Arc::new(MemoryStore::default());
        let state = test_state(store.clone(), Arc::new(RecordingTransport::failing()), "admin@x.com");

        let (status, body) = post(
            state,
            "/api/rsvp",
            "application/json",
            r#"{"name":"Leela","email":"leela@example.com","attending":"yes"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(store.rsvps().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_email_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let state = test_state(store.clone(), Arc::new(RecordingTransport::default()), "");

        let (status, body) = post(
            state,
            "/api/rsvp",
            "application/x-www-form-urlencoded",
            "name=Leela&attending=1",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.message, "Email is required");
        assert!(store.rsvps().is_empty());
    }
}
