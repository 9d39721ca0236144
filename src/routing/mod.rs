//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered scan of the compiled table)
//!     → matcher.rs (prefix match with segment boundaries)
//!     → Return: matched Route (falling back to the catch-all)
//!
//! Table compilation (at startup):
//!     RouteConfig[]
//!     → parse each target into scheme + authority
//!     → locate the mandatory catch-all
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime (lock-free sharing)
//! - O(n) prefix scan, first match wins; no regex in the hot path
//! - A missing catch-all is a startup error, never a per-request 404

pub mod matcher;
pub mod router;

pub use router::{Route, RouteError, RouteTable};
