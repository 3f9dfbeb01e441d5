//! Route definitions for the HTTP API.

pub mod auth;
pub mod health;
pub mod notes;
pub mod share;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::config::ConfigError;
use crate::middleware::{
    cors::cors_layer,
    request_id::{propagate_request_id, request_id_layer},
};
use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(notes::routes())
        .merge(share::routes())
        .with_state(state)
}

/// Build the router with its middleware stack applied.
pub fn build_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = cors_layer(&state.config().cors_allowed_origins)?;

    Ok(build_router(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
