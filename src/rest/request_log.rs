use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;

/// Logs every request with its status and wall-clock duration. Log lines
/// emitted while handling the request carry the method and path.
pub async fn log_request_timing(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("request", %method, %path);
    let started = Instant::now();

    let response = next.run(req).instrument(span).await;

    log::info!(
        "{} {} -> {} | Request took {:.2} seconds",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64()
    );
    response
}
