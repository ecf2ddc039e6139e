pub mod admin;
pub mod contact;
pub mod extract;
pub mod guestbook;
pub mod health;
pub mod metrics;
pub mod rsvp;

use axum::{middleware, routing::post, Router};

use crate::state::AppState;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        // Form action used by the static site
        .route("/submit-rsvp", post(rsvp::create_rsvp))
        .merge(health::health_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::request_metrics,
        ))
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/rsvp", rsvp::rsvp_routes())
        .nest("/guestbook", guestbook::guestbook_routes())
        .nest("/contact", contact::contact_routes())
        .nest("/admin", admin::admin_routes())
}
