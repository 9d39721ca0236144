//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, proxy handler)
//!     → request.rs (request ID, inbound header filtering)
//!     → [routing table picks the upstream]
//!     → upstream.rs (bounded outbound call)
//!     → response.rs (outbound header filtering, 502 mapping)
//!     → Stream to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
pub use upstream::UpstreamError;
