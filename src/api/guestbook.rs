use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::extract::FormOrJson;
use crate::error::Result;
use crate::models::{GuestbookEntry, GuestbookSubmission};
use crate::state::AppState;

/// Guestbook routes
pub fn guestbook_routes() -> Router<AppState> {
    Router::new().route("/", get(list_entries).post(create_entry))
}

#[derive(Deserialize)]
struct ListEntriesQuery {
    limit: Option<usize>,
}

/// GET /api/guestbook - Most recent entries first
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<Vec<GuestbookEntry>>> {
    let limit = query.limit.unwrap_or(100).min(500);
    let entries = state.store.list_guestbook_entries(limit).await?;
    Ok(Json(entries))
}

/// POST /api/guestbook - Sign the guestbook
async fn create_entry(
    State(state): State<AppState>,
    FormOrJson(submission): FormOrJson<GuestbookSubmission>,
) -> Result<Json<GuestbookEntry>> {
    let entry = submission.into_entry()?;
    state.store.insert_guestbook_entry(&entry).await?;

    tracing::info!(entry_id = %entry.id, "Guestbook signed");
    Ok(Json(entry))
}
