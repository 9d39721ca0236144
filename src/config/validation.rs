//! Configuration validation.
//!
//! Semantic checks on a loaded [`GatewayConfig`]. Serde handles the
//! syntactic layer; this module checks what the types cannot express:
//! route table shape, target URL sanity, value ranges. All errors are
//! collected and returned together rather than stopping at the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("route table has no catch-all entry (empty prefix); the default route is mandatory")]
    MissingDefaultRoute,

    #[error("route {name:?}: prefix {prefix:?} must start with '/' and not end with '/'")]
    InvalidPrefix { name: String, prefix: String },

    #[error("route {name:?}: invalid target URL {target:?}: {reason}")]
    InvalidTarget {
        name: String,
        target: String,
        reason: String,
    },

    #[error("route {name:?} is listed after the catch-all and can never match")]
    UnreachableRoute { name: String },

    #[error("invalid bind address {address:?}")]
    InvalidBindAddress { address: String },

    #[error("timeout {name} must be nonzero")]
    ZeroTimeout { name: &'static str },
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    let mut catch_all_seen = false;
    for route in &config.routes {
        if catch_all_seen {
            errors.push(ValidationError::UnreachableRoute {
                name: route.name.clone(),
            });
        }
        if route.prefix.is_empty() {
            catch_all_seen = true;
        } else if !route.prefix.starts_with('/') || route.prefix.ends_with('/') {
            errors.push(ValidationError::InvalidPrefix {
                name: route.name.clone(),
                prefix: route.prefix.clone(),
            });
        }

        if let Some(reason) = check_target(&route.target) {
            errors.push(ValidationError::InvalidTarget {
                name: route.name.clone(),
                target: route.target.clone(),
                reason,
            });
        }
    }

    if !catch_all_seen {
        errors.push(ValidationError::MissingDefaultRoute);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            name: "request_secs",
        });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            name: "connect_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Target base URLs must be absolute http(s) URLs with a host and no path
/// of their own (the router discards the base path when rewriting).
fn check_target(target: &str) -> Option<String> {
    let url = match Url::parse(target) {
        Ok(url) => url,
        Err(e) => return Some(e.to_string()),
    };
    if url.scheme() != "http" && url.scheme() != "https" {
        return Some(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Some("missing host".to_string());
    }
    if !matches!(url.path(), "" | "/") {
        return Some(format!(
            "target must not carry a path (got {:?})",
            url.path()
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn missing_catch_all_is_rejected() {
        let mut config = GatewayConfig::default();
        config.routes = vec![RouteConfig {
            name: "admin".into(),
            prefix: "/admin".into(),
            target: "http://127.0.0.1:8602".into(),
            strip_prefix: true,
        }];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingDefaultRoute)));
    }

    #[test]
    fn route_after_catch_all_is_unreachable() {
        let mut config = GatewayConfig::default();
        config.routes = vec![
            RouteConfig {
                name: "main".into(),
                prefix: String::new(),
                target: "http://127.0.0.1:8601".into(),
                strip_prefix: false,
            },
            RouteConfig {
                name: "admin".into(),
                prefix: "/admin".into(),
                target: "http://127.0.0.1:8602".into(),
                strip_prefix: true,
            },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnreachableRoute { name } if name == "admin")));
    }

    #[test]
    fn bad_targets_are_rejected() {
        let mut config = GatewayConfig::default();
        config.routes[0].target = "ftp://127.0.0.1:21".into();
        config.routes[1].target = "http://127.0.0.1:8601/app".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::InvalidTarget { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn all_errors_are_reported_together() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.routes[0].prefix = "admin/".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
