//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Default external listen port (`PORT`).
pub const DEFAULT_PORT: u16 = 8080;

/// Default catch-all upstream (`MAIN_TARGET`).
pub const DEFAULT_MAIN_TARGET: &str = "http://127.0.0.1:8601";

/// Default admin upstream (`ADMIN_TARGET`).
pub const DEFAULT_ADMIN_TARGET: &str = "http://127.0.0.1:8602";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered route table; the first matching prefix wins.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The stock two-entry table: `/admin` (stripped) and the catch-all.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: "admin".to_string(),
            prefix: "/admin".to_string(),
            target: DEFAULT_ADMIN_TARGET.to_string(),
            strip_prefix: true,
        },
        RouteConfig {
            name: "main".to_string(),
            prefix: String::new(),
            target: DEFAULT_MAIN_TARGET.to_string(),
            strip_prefix: false,
        },
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{DEFAULT_PORT}"),
        }
    }
}

/// One entry in the route table.
///
/// Ordering matters: more specific prefixes must come before shorter ones,
/// and the catch-all (empty prefix) must be last.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match. Empty matches every path (the default route).
    pub prefix: String,

    /// Upstream base URL; its own path component is discarded.
    pub target: String,

    /// Remove the matched prefix from the path before forwarding.
    #[serde(default)]
    pub strip_prefix: bool,
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Bound on each upstream call (until response headers) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape endpoint address; `None` disables the exporter.
    pub metrics_address: Option<String>,
}
