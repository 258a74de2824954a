//! One-request reverse proxy to the frontend dev server.

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use url::Url;

/// Forward one request to the dev server, streaming the response back.
///
/// Method, headers, and body pass through untouched apart from `host`; the
/// upstream status and headers come back as-is. If the inbound client goes
/// away the handler future is dropped, which drops the in-flight upstream
/// response and aborts the transfer.
pub async fn forward(client: &reqwest::Client, target: &Url, req: Request) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(req.uri().path());
    let url = format!(
        "{}{}",
        target.as_str().trim_end_matches('/'),
        path_and_query
    );

    let Ok(method) = reqwest::Method::from_bytes(req.method().as_str().as_bytes()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut builder = client.request(method, &url);
    for (key, value) in req.headers() {
        if key != "host" {
            builder = builder.header(key.as_str(), value.as_bytes());
        }
    }

    let body_bytes = match axum::body::to_bytes(req.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    if !body_bytes.is_empty() {
        builder = builder.body(body_bytes);
    }

    let upstream = match builder.send().await {
        Ok(upstream) => upstream,
        Err(err) => {
            tracing::warn!("dev proxy request to {url} failed: {err}");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = Response::builder().status(status);
    for (key, value) in upstream.headers() {
        response = response.header(key.as_str(), value.as_bytes());
    }

    let body = Body::from_stream(upstream.bytes_stream());
    response
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
