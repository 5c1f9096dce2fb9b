//! HTTP API for stored passwords.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use axum::{middleware as axum_middleware, routing::get, Router};
use credential_store::PasswordService;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Password service over the configured store
    pub service: Arc<PasswordService>,
}

impl AppState {
    /// Create new application state.
    pub fn new(service: PasswordService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Create the API router with the default request timeout.
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, Duration::from_secs(10))
}

/// Create the API router with a custom request timeout.
pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/password",
            get(handlers::search_passwords).post(handlers::create_password),
        )
        .route("/password/:phone", get(handlers::list_passwords))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
