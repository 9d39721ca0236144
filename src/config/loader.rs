//! Configuration loading from the environment.

use std::env;

use crate::config::schema::{
    GatewayConfig, ListenerConfig, RouteConfig, DEFAULT_ADMIN_TARGET, DEFAULT_MAIN_TARGET,
    DEFAULT_PORT,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable was set to an unparseable value.
    InvalidEnv { var: &'static str, value: String },
    /// The loaded configuration failed semantic validation.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "Invalid value {value:?} for environment variable {var}")
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from the environment.
///
/// Every variable is optional:
/// `PORT` (default 8080), `MAIN_TARGET` (default `http://127.0.0.1:8601`),
/// `ADMIN_TARGET` (default `http://127.0.0.1:8602`),
/// `REQUEST_TIMEOUT_SECS` (default 30), `METRICS_ADDR` (default unset).
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let port: u16 = parsed_var("PORT", DEFAULT_PORT)?;
    let main_target = env::var("MAIN_TARGET").unwrap_or_else(|_| DEFAULT_MAIN_TARGET.to_string());
    let admin_target =
        env::var("ADMIN_TARGET").unwrap_or_else(|_| DEFAULT_ADMIN_TARGET.to_string());

    let mut config = GatewayConfig::default();
    config.listener = ListenerConfig {
        bind_address: format!("0.0.0.0:{port}"),
    };
    config.routes = vec![
        RouteConfig {
            name: "admin".to_string(),
            prefix: "/admin".to_string(),
            target: admin_target,
            strip_prefix: true,
        },
        RouteConfig {
            name: "main".to_string(),
            prefix: String::new(),
            target: main_target,
            strip_prefix: false,
        },
    ];
    config.timeouts.request_secs = parsed_var("REQUEST_TIMEOUT_SECS", config.timeouts.request_secs)?;
    config.observability.metrics_address = env::var("METRICS_ADDR").ok();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parsed_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(default),
    }
}
