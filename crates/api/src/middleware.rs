use std::time::Instant;

use axum::{middleware::Next, response::Response};

/// Logs one line per request with method, path, status and latency.
pub async fn log_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(%method, path = %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, path = %path, status = status.as_u16(), elapsed_ms, "request handled");
    }
    response
}
