use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::compose::report::{compose_report, random_sign_off};
use crate::error::{AppError, Result};
use crate::jobs::send_daily_report;
use crate::models::RsvpResponse;
use crate::security::password_matches;
use crate::state::AppState;

pub const PASSWORD_HEADER: &str = "x-admin-password";

/// Admin routes, guarded by the shared password
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(view_report))
        .route("/digest", post(send_digest))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let expected = state
        .config
        .admin_password
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Admin access is disabled".to_string()))?;

    let provided = headers
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !password_matches(expected, provided) {
        tracing::warn!("Rejected admin request with wrong password");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }
    Ok(())
}

/// GET /api/admin/report - Render the RSVP report in the browser
async fn view_report(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>> {
    authorize(&state, &headers)?;

    let records = state.store.list_rsvps().await?;
    Ok(Html(compose_report(
        &records,
        Utc::now(),
        &state.config.report_offset,
        random_sign_off(),
    )))
}

/// POST /api/admin/digest - Email the RSVP report to the admins now
async fn send_digest(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<RsvpResponse>> {
    authorize(&state, &headers)?;

    let count = send_daily_report(&state).await?;
    Ok(Json(RsvpResponse {
        success: true,
        message: format!("Report with {} RSVPs sent", count),
    }))
}
