//! Stream Gateway
//!
//! HTTP gateway with a WebSocket streaming endpoint.
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  GATEWAY                      │
//!                    │                                               │
//!   Client ─────────▶│  middleware (request records)                │
//!                    │      → router                                 │
//!                    │          GET /health ──────────┐              │
//!                    │          GET /api/v1/users/{id}├── handlers   │
//!                    │          POST /api/v1/users ───┘   (store)    │
//!                    │          GET /ws → upgrade gateway            │
//!                    │                       │                       │
//!                    │                       ▼                       │
//!                    │              streaming session                │
//!                    │         (receive loop, frame events)          │
//!                    │                                               │
//!                    │  lifecycle: Starting → Running → Draining →   │
//!                    │             Stopped (signal-driven, bounded   │
//!                    │             grace period)                     │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use stream_gateway::config::loader;
use stream_gateway::http::HttpServer;
use stream_gateway::observability::{logging, TracingSink};
use stream_gateway::store::StaticStore;
use stream_gateway::GatewayError;

#[derive(Parser, Debug)]
#[command(name = "stream-gateway", about = "HTTP gateway with a WebSocket streaming endpoint")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match loader::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not initialized yet; config errors go to stderr.
            eprintln!("stream-gateway: {}", GatewayError::from(e));
            return ExitCode::FAILURE;
        }
    };
    if let Some(port) = cli.port {
        config.set_port(port);
    }

    logging::init(config.observability.log_json);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        grace_period_secs = config.shutdown.grace_period_secs,
        peer_service_addr = %config.peer.service_addr,
        "configuration loaded"
    );

    let bind_address = config.listener.bind_address.clone();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(source) => {
            let e = GatewayError::Bind {
                addr: bind_address,
                source,
            };
            tracing::error!(error = %e, "could not start server");
            return ExitCode::FAILURE;
        }
    };

    let server = HttpServer::new(config, Arc::new(StaticStore), Arc::new(TracingSink));

    match server.run(listener).await {
        Ok(()) => {
            tracing::info!("server exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
