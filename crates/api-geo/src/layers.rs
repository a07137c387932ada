use crate::server::error::{self as server_error, ServerResult};
use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use snafu::ResultExt;
use std::str::FromStr;
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with an id, reusing a well-formed incoming `x-request-id`. The id is
/// echoed in the response and recorded on the span covering the request.
pub async fn add_request_metadata(
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::from_str(value).ok())
        .unwrap_or_else(Uuid::now_v7);
    let span = tracing::info_span!("request", %request_id);
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub fn make_cors_middleware(origin: &str) -> ServerResult<CorsLayer> {
    let origin_value = origin
        .parse::<HeaderValue>()
        .context(server_error::InvalidOriginSnafu { origin })?;
    Ok(CorsLayer::new()
        .allow_origin(origin_value)
        .allow_methods(vec![Method::GET, Method::POST, Method::HEAD])
        .allow_headers(vec![CONTENT_TYPE]))
}
