//! Erised server binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────────┐
//!                              │                     ERISED                        │
//!                              │                                                   │
//!     Client Request           │  ┌─────────┐    ┌─────────┐    ┌─────────────┐   │
//!     ─────────────────────────┼─▶│   net   │───▶│  http   │───▶│  directive  │   │
//!     (X-Erised-* headers)     │  │ tcp/tls │    │ server  │    │    parse    │   │
//!                              │  └─────────┘    └─────────┘    └──────┬──────┘   │
//!                              │                                       │          │
//!                              │                                       ▼          │
//!     Client Response          │                 ┌─────────┐    ┌─────────────┐   │
//!     ◀────────────────────────┼─────────────────│response │◀───│ body source │   │
//!                              │                 │ writer  │    │ data / file │   │
//!                              │                 └─────────┘    └─────────────┘   │
//!                              │                                                   │
//!                              │  ┌──────────┐ ┌─────────────┐ ┌──────────────┐   │
//!                              │  │  config  │ │observability│ │  lifecycle   │   │
//!                              │  └──────────┘ └─────────────┘ └──────────────┘   │
//!                              └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use erised::config::Cli;
use erised::http::HttpServer;
use erised::lifecycle::{spawn_signal_listener, Shutdown};
use erised::net::load_tls_config;
use erised::observability::{logging::init_logging, metrics::init_metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        https = config.listener.https,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        search_path = %config.search.path,
        "erised starting"
    );

    if let Some(address) = &config.observability.metrics_address {
        init_metrics(address.parse()?)?;
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config.clone(), shutdown);

    if config.listener.https {
        let tls = load_tls_config(&config.listener).await?;
        let addr = tokio::net::lookup_host(config.listener.bind_address())
            .await?
            .next()
            .ok_or("bind address did not resolve")?;
        server.run_tls(addr, tls, server_shutdown).await?;
    } else {
        let listener = TcpListener::bind(config.listener.bind_address()).await?;
        server.run(listener, server_shutdown).await?;
    }

    tracing::info!("erised server terminated");
    Ok(())
}
