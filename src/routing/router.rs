//! Route table compilation and lookup.

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::RouteConfig;
use crate::routing::matcher::prefix_matches;

/// Error raised while compiling the route table at startup.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route {name:?}: invalid target URL {target:?}")]
    InvalidTarget { name: String, target: String },

    #[error("route table has no catch-all entry (empty prefix)")]
    MissingDefaultRoute,
}

/// A compiled route: match rule plus pre-parsed upstream target.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    prefix: String,
    strip_prefix: bool,
    target: String,
    scheme: Scheme,
    authority: Authority,
}

impl Route {
    fn compile(config: &RouteConfig) -> Result<Self, RouteError> {
        let invalid = || RouteError::InvalidTarget {
            name: config.name.clone(),
            target: config.target.clone(),
        };
        let uri: Uri = config.target.parse().map_err(|_| invalid())?;
        let scheme = uri.scheme().cloned().ok_or_else(invalid)?;
        let authority = uri.authority().cloned().ok_or_else(invalid)?;
        // The target's own path (if any) is discarded: only scheme and
        // authority survive into the forwarded URL.
        Ok(Self {
            name: config.name.clone(),
            prefix: config.prefix.clone(),
            strip_prefix: config.strip_prefix,
            target: format!("{scheme}://{authority}"),
            scheme,
            authority,
        })
    }

    /// Route identifier, for logging and metrics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upstream base (`scheme://authority`), for logging and metrics.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Upstream authority, used to rewrite the `Host` header.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    fn matches(&self, path: &str) -> bool {
        prefix_matches(&self.prefix, path)
    }

    /// The path the upstream sees: the original path, minus the matched
    /// prefix when stripping is enabled. Never empty.
    pub fn forward_path<'p>(&self, path: &'p str) -> &'p str {
        let rest = if self.strip_prefix {
            path.strip_prefix(self.prefix.as_str()).unwrap_or(path)
        } else {
            path
        };
        if rest.is_empty() {
            "/"
        } else {
            rest
        }
    }

    /// Build the full forwarding URI for `path` and the raw inbound query.
    ///
    /// The query string is appended verbatim, never re-parsed or
    /// re-encoded, so ordering, duplicate keys, and percent-encoding reach
    /// the upstream byte-for-byte.
    pub fn target_uri(&self, path: &str, query: Option<&str>) -> Result<Uri, axum::http::Error> {
        let forward = self.forward_path(path);
        let path_and_query = match query {
            Some(q) if !q.is_empty() => format!("{forward}?{q}"),
            _ => forward.to_string(),
        };
        let mut parts = axum::http::uri::Parts::default();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        parts.path_and_query = Some(PathAndQuery::try_from(path_and_query.as_str())?);
        Ok(Uri::from_parts(parts)?)
    }
}

/// Immutable, ordered route table. Compiled once at startup and shared
/// lock-free across request handlers.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    default_idx: usize,
}

impl RouteTable {
    /// Compile a table from configuration. Fails fast if a target URL does
    /// not parse or the mandatory catch-all entry is missing.
    pub fn new(configs: &[RouteConfig]) -> Result<Self, RouteError> {
        let routes = configs
            .iter()
            .map(Route::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let default_idx = routes
            .iter()
            .position(|r| r.prefix.is_empty())
            .ok_or(RouteError::MissingDefaultRoute)?;
        Ok(Self {
            routes,
            default_idx,
        })
    }

    /// Resolve a request path: first matching prefix wins, falling back to
    /// the catch-all. Infallible by construction.
    pub fn resolve(&self, path: &str) -> &Route {
        self.routes
            .iter()
            .find(|r| r.matches(path))
            .unwrap_or(&self.routes[self.default_idx])
    }
}
