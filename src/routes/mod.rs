//! HTTP route handlers for the payments API.
//!
//! Every response is marked `Cache-Control: no-store`: payment outcomes are
//! random and liveness answers must always be fresh.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod payments;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::error::AppError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Fallback for unknown paths.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let payment_routes = Router::new().route("/payments", post(payments::create));

    // Health check - always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(payment_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
