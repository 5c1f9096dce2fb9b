//! Request logging middleware.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// Logging middleware for requests.
///
/// Logs the route template rather than the URI, which carries phone numbers.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = std::time::Instant::now();

    debug!(%method, %route, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %route, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %route, %status, ?duration, "Request failed");
    }

    response
}
