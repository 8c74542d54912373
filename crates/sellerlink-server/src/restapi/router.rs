//! REST router.

use crate::middleware::request_id;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(super::handlers::health))
        .route("/ready", get(super::handlers::ready))
        .route("/auth/login", post(super::handlers::login))
        .route("/auth/logout", post(super::handlers::logout))
        .layer(axum::middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
