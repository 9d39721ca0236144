//! Wellbeing gateway library.
//!
//! A reverse proxy that fronts the student-facing wellbeing UI and its
//! admin panel under a single externally reachable port, forwarding by
//! path prefix.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
