//! Wellbeing gateway (reverse proxy).
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────┐
//!                   │                 GATEWAY                    │
//!                   │                                            │
//!   Client Request  │  ┌─────────┐   ┌──────────┐   ┌─────────┐ │
//!   ────────────────┼─▶│  http   │──▶│ routing  │──▶│ http    │─┼──▶ Upstream
//!                   │  │ server  │   │  table   │   │ client  │ │    (main / admin)
//!                   │  └─────────┘   └──────────┘   └─────────┘ │
//!                   │                                            │
//!   Client Response │  streamed back verbatim, hop-by-hop       │
//!   ◀───────────────┼── headers stripped, status preserved      │
//!                   │                                            │
//!                   │  config · lifecycle · observability       │
//!                   └───────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the environment (`PORT`, `MAIN_TARGET`,
//! `ADMIN_TARGET`, `REQUEST_TIMEOUT_SECS`, `METRICS_ADDR`), read once at
//! startup.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wellbeing_gateway::config::loader;
use wellbeing_gateway::http::HttpServer;
use wellbeing_gateway::lifecycle::Shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellbeing_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("wellbeing-gateway v0.1.0 starting");

    // Load configuration from the environment once; never re-read per request.
    let config = loader::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Optional Prometheus exporter.
    if let Some(metrics_address) = &config.observability.metrics_address {
        match metrics_address.parse() {
            Ok(addr) => wellbeing_gateway::observability::metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    shutdown.spawn_signal_listener();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
