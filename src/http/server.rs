//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Create the Axum router dispatching every method on every path
//! - Wire up middleware (tracing, request ID)
//! - Resolve the route, rewrite the URL, forward, and stream the reply
//! - Convert upstream failures into a plain-text 502

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode, Version};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::request::{self, RequestIdLayer, X_REQUEST_ID};
use crate::http::{response, upstream};
use crate::observability::metrics;
use crate::routing::{RouteError, RouteTable};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub client: Client<HttpConnector, Body>,
    pub request_timeout: Duration,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compile the route table and build the router. Fails fast on an
    /// invalid route table; nothing is bound yet at that point.
    pub fn new(config: GatewayConfig) -> Result<Self, RouteError> {
        let routes = Arc::new(RouteTable::new(&config.routes)?);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            routes,
            client,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until the shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The forwarding pipeline: resolve → rewrite → forward → relay.
///
/// Exactly one upstream call per inbound request. The inbound body is
/// passed through as a stream for every method, and the upstream body is
/// relayed as its frames arrive; neither is buffered here.
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (mut parts, body) = request.into_parts();
    let method = parts.method.to_string();
    let route = state.routes.resolve(parts.uri.path());

    let target_uri = match route.target_uri(parts.uri.path(), parts.uri.query()) {
        Ok(uri) => uri,
        Err(error) => {
            // Unreachable for any URI the server layer accepted; covered anyway.
            tracing::error!(
                request_id = %request_id,
                path = %parts.uri.path(),
                error = %error,
                "Failed to build forwarding URL"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid forwarding URL").into_response();
        }
    };

    parts.headers = request::filter_headers(&parts.headers);
    // Host names the upstream, not this gateway.
    if let Ok(host) = HeaderValue::from_str(route.authority().as_str()) {
        parts.headers.insert(header::HOST, host);
    }
    if let Ok(id) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(X_REQUEST_ID, id);
    }
    parts.uri = target_uri.clone();
    // Upstreams are plain local HTTP servers; the inbound protocol version
    // does not carry over to the pooled client connection.
    parts.version = Version::HTTP_11;

    let outbound = Request::from_parts(parts, body);

    match upstream::forward(&state.client, outbound, state.request_timeout).await {
        Ok(upstream_response) => {
            let status = upstream_response.status();
            tracing::info!(
                request_id = %request_id,
                target = %route.target(),
                method = %method,
                url = %target_uri,
                status = status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Request forwarded"
            );
            metrics::record_request(&method, status.as_u16(), route.target(), start);

            let (mut parts, body) = upstream_response.into_parts();
            parts.headers = response::filter_headers(&parts.headers);
            // Status preserved exactly; the body streams through untouched.
            Response::from_parts(parts, Body::new(body))
        }
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                target = %route.target(),
                method = %method,
                url = %target_uri,
                error = %error,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream request failed"
            );
            metrics::record_request(&method, StatusCode::BAD_GATEWAY.as_u16(), route.target(), start);

            response::bad_gateway(&error)
        }
    }
}
