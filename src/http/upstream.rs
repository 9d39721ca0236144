//! Outbound upstream calls.
//!
//! The single place the gateway talks to an upstream. The helper returns
//! an explicit result rather than letting a transport error escape into
//! the serving framework: the caller inspects it and chooses between
//! relaying the response and emitting a 502.

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use hyper::body::Incoming;
use hyper::Response;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use thiserror::Error;

/// Why an upstream call produced no response.
///
/// A timeout is treated identically to a connection failure by the caller;
/// the distinction only shows up in the client-visible text and the logs.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Failed(#[from] hyper_util::client::legacy::Error),

    #[error("upstream request failed: no response within {0:?}")]
    TimedOut(Duration),
}

/// Issue the outbound call, bounded by `timeout`.
///
/// The response resolves as soon as upstream headers arrive; the body
/// inside it is still streaming, so a slow or large payload is not held
/// to the same bound. Exactly one attempt: no retry, no fan-out.
pub async fn forward(
    client: &Client<HttpConnector, Body>,
    request: Request<Body>,
    timeout: Duration,
) -> Result<Response<Incoming>, UpstreamError> {
    match tokio::time::timeout(timeout, client.request(request)).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(error)) => Err(UpstreamError::Failed(error)),
        Err(_) => Err(UpstreamError::TimedOut(timeout)),
    }
}
