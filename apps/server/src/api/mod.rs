//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub const API_PREFIX: &str = "/api/v1";

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let request_timeout = state.config.server.request_timeout_seconds;
    let cors_origins = state.config.server.cors_origins.clone();

    let protected = routes::resources::resource_routes().route_layer(
        axum::middleware::from_fn_with_state(state.clone(), crate::auth::auth_middleware),
    );

    let api = Router::new()
        .route("/health", get(handlers::system::health_check))
        .route("/auth/token", post(handlers::auth::issue_token))
        .merge(routes::metrics::metrics_routes())
        .merge(protected);

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(state)
        // Applied in reverse order: the body limit runs first. A 408 from the
        // timeout must still pass through the request id and metrics layers.
        .layer(middleware::timeout(request_timeout))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::body_limit(max_body_size))
}
