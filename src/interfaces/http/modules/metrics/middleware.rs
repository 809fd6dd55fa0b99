//! HTTP request metrics middleware
//!
//! Records `turistae_http_requests_total` (counter) and
//! `turistae_http_request_duration_seconds` (histogram) for every request.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    // Matched route keeps label cardinality bounded (`/api/usuario/{id}`).
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "turistae_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "turistae_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}
