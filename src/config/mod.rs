//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables (PORT, MAIN_TARGET, ADMIN_TARGET, ...)
//!     → loader.rs (read once at startup)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with all request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the gateway runs with an empty environment
//! - Validation is separate from loading and reports every error it finds

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::RouteConfig;
pub use schema::TimeoutConfig;
