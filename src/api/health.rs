use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub datastore: String,
    pub site_variant: String,
    pub timestamp: String,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let datastore_status = match state.store.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "error",
        Err(_) => "disconnected",
    };

    let overall_status = if datastore_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Ok(Json(HealthResponse {
        status: overall_status.to_string(),
        datastore: datastore_status.to_string(),
        site_variant: state.config.site_variant.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::testing::{test_state, MemoryStore, RecordingTransport};

    async fn health(store: MemoryStore) -> serde_json::Value {
        let state = test_state(Arc::new(store), Arc::new(RecordingTransport::default()), "");
        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_datastore() {
        let body = health(MemoryStore::default()).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["datastore"], "connected");
        assert_eq!(body["site_variant"], "0");

        let body = health(MemoryStore::failing()).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["datastore"], "error");
    }
}
