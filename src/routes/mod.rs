use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::admin_context_middleware;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    attendance::update_attendance, events::create_event, events::past_events, health_check,
    members::add_club_members, profile::admin_profile,
};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/attendance", put(update_attendance))
        .route("/events", post(create_event))
        .route("/events/past", get(past_events))
        .route("/profile", get(admin_profile))
        .route("/club-members", post(add_club_members))
        .layer(middleware::from_fn(admin_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}
