//! Request handling and transformation.
//!
//! # Responsibilities
//! - Assign a unique request ID (UUID v4) as early as possible
//! - Filter inbound headers before forwarding
//!
//! # Design Decisions
//! - `HeaderMap` is the case-insensitive ordered multimap the filtering
//!   contract requires; names compare lowercased regardless of what the
//!   client sent
//! - `Content-Length`/`Transfer-Encoding` are dropped because the client
//!   layer recomputes framing from the actual forwarded body; forwarding
//!   stale values risks a framing mismatch

use std::task::{Context, Poll};

use axum::http::{HeaderMap, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Inbound request headers that are never forwarded upstream.
const EXCLUDED_REQUEST_HEADERS: [&str; 4] =
    ["host", "content-length", "transfer-encoding", "connection"];

/// Copy all request headers except the exclusion set, preserving order and
/// repeated values.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if EXCLUDED_REQUEST_HEADERS.contains(&name.as_str()) {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

/// Tower layer that stamps `x-request-id` on requests lacking one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        if !request.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                request.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(request)
    }
}
