//! CORS-normalizing API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ request id ──▶ trace ──▶ CORS filter chain ──▶ route lookup ──▶ upstream
//!                                         │  strip Origin      │                  │
//!                                         │                    └──▶ fallback (503) │
//!     Client ◀────────────────────────────┤  strip backend CORS ◀───────────────────┘
//!                                         └─ add gateway CORS
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_gateway::config::{load_config, GatewayConfig};
use cors_gateway::lifecycle::{signals, Shutdown};
use cors_gateway::observability::{logging, metrics};
use cors_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "cors-gateway")]
#[command(about = "API gateway that owns the client-visible CORS policy", long_about = None)]
struct Cli {
    /// TOML configuration file. Compiled-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("cors-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_file = ?cli.config,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        shutdown.trigger();
    });

    let server = GatewayServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
