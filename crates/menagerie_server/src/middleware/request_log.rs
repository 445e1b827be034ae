//! One log line per request.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};

/// Logs method, path, status, content length and duration of every request.
///
/// Installed outermost, so the method is the one sent on the wire (before
/// method override).
pub async fn log_request(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let status = response.status();
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let duration_ms = started_at.elapsed().as_millis();

    if status.is_server_error() {
        warn!(
            "event=http_request module=server status=error method={method} path={path} http_status={} content_length={content_length} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=server status=ok method={method} path={path} http_status={} content_length={content_length} duration_ms={duration_ms}",
            status.as_u16()
        );
    }

    response
}
