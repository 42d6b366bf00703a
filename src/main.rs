//! NAS CORS Forwarding Proxy
//!
//! A single-endpoint forwarding service built with Tokio and Axum. Browser
//! pages blocked by same-origin policy call `GET /proxy?url=<target>`; the
//! proxy fetches the target from the NAS with injected Basic-auth
//! credentials and relays the bytes back with permissive CORS headers.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 CORS PROXY                    │
//!                        │                                               │
//!   Browser Request      │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ─────────────────────┼─▶│  http   │───▶│ forward  │───▶│upstream │──┼──▶ NAS
//!                        │  │ server  │    │ handler  │    │ client  │  │
//!                        │  └─────────┘    └──────────┘    └────┬────┘  │
//!                        │                                      │       │
//!   Browser Response     │  ┌─────────┐    ┌──────────┐         │       │
//!   ◀────────────────────┼──│  CORS   │◀───│ response │◀────────┘       │
//!                        │  │ headers │    │  relay   │                 │
//!                        │  └─────────┘    └──────────┘                 │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐ │
//!                        │  │          Cross-Cutting Concerns          │ │
//!                        │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                        │  │  │ config │ │observability│ │lifecycle│ │ │
//!                        │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                        │  └─────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::Path;
use tokio::net::TcpListener;

use cors_proxy::config::{self, ProxyConfig};
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::{signals, Shutdown};
use cors_proxy::observability::logging;
use cors_proxy::upstream::UpstreamClient;

/// Config file looked up in the working directory. Optional; built-in
/// defaults apply when it is absent.
const CONFIG_PATH: &str = "proxy.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration before logging so the configured level applies
    // from the first event. A present-but-broken config file is fatal.
    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        config::load_config(config_path)?
    } else {
        ProxyConfig::default()
    };

    logging::init(&config.observability);

    tracing::info!("cors-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_host = %config.upstream.host,
        upstream_port = config.upstream.port,
        timeout_secs = config.upstream.timeout_secs,
        restrict_targets = config.upstream.restrict_targets,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // One upstream client for the process lifetime; the Basic-auth token
    // is computed once here.
    let upstream = UpstreamClient::new(&config.upstream)?;

    // Translate SIGINT/SIGTERM into the shutdown broadcast.
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    // Create and run HTTP server
    let server = HttpServer::new(config, upstream);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
