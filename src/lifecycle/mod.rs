//! Lifecycle management subsystem.
//!
//! Startup is fail-fast and ordered (config → route table → listener);
//! shutdown is signal-driven (SIGINT/SIGTERM) and drains in-flight
//! requests through the server's graceful-shutdown hook.

pub mod shutdown;

pub use shutdown::Shutdown;
