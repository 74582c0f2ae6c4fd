//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/actions", post(action_handler))
        .route("/state", get(status_handler))
        .route("/destinations", get(destinations_handler))
        .route("/options/:category", get(options_handler))
        .route("/breakdown", get(breakdown_handler))
        .route("/chart", get(chart_handler))
        .route("/confirmation", get(confirmation_handler))
        .route("/registration", get(registration_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
