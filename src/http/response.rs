//! Response handling and transformation.
//!
//! # Responsibilities
//! - Filter upstream response headers before relaying
//! - Map upstream failures to a plain-text 502
//!
//! # Design Decisions
//! - Streaming relay means the body the client sees may be re-framed, so
//!   `Content-Encoding`/`Content-Length` are dropped and the serving layer
//!   recomputes correct framing
//! - The 502 body is short plain text; framework error pages and stack
//!   traces never reach the client

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::upstream::UpstreamError;

/// Upstream response headers that are never relayed to the client.
const EXCLUDED_RESPONSE_HEADERS: [&str; 4] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

/// Copy all response headers except the exclusion set, preserving order
/// and repeated values. The status code is relayed untouched elsewhere.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if EXCLUDED_RESPONSE_HEADERS.contains(&name.as_str()) {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

/// The client-visible shape of every upstream failure.
pub fn bad_gateway(error: &UpstreamError) -> Response {
    (StatusCode::BAD_GATEWAY, error.to_string()).into_response()
}
