use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use tracing::Level;

use crate::state::AppState;

/// Coarse operating system from a User-Agent string
pub fn extract_device_os(user_agent: Option<&str>) -> &'static str {
    let Some(ua) = user_agent.filter(|ua| !ua.is_empty()) else {
        return "unknown";
    };
    let ua = ua.to_ascii_lowercase();

    if ua.contains("windows") {
        "Windows"
    } else if ua.contains("android") {
        "Android"
    } else if ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d)) {
        "iOS"
    } else if ua.contains("macintosh") || ua.contains("mac os x") {
        "MacOS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        "Other"
    }
}

/// Record path, status and latency of every request, tagged with the
/// client OS and the site variant.
pub async fn request_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req.uri().path().to_string();
    let method = req.method().to_string();
    let device_os = extract_device_os(
        req.headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok()),
    );

    let response = next.run(req).await;

    let response_time_ms = start.elapsed().as_millis() as u64;
    state
        .telemetry
        .log(
            Level::INFO,
            "Request metrics",
            crate::fields! {
                "path" => path,
                "method" => method,
                "statusCode" => response.status().as_u16(),
                "responseTime" => response_time_ms,
                "tags" => serde_json::json!({
                    "device_os": device_os,
                    "env_type": state.config.site_variant.code(),
                }),
            },
        )
        .await;

    response
}
