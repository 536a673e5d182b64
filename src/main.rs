//! Configuration-Driven SSH Command Gateway
//!
//! Reads (method, path) route definitions from a MySQL store, exposes
//! one HTTP endpoint per row, and on each request authorizes the caller
//! and runs the route's fixed command over SSH.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!                    │                  GATEWAY                   │
//!                    │                                            │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│ routing │──▶│ security │──▶│  exec   │─┼──▶ SSH host
//!                    │  │ (static │   │  token   │   │ one-shot│ │
//!                    │  │  table) │   │  gate    │   │ command │ │
//!                    │  └────┬────┘   └──────────┘   └────┬────┘ │
//!                    │       │ per-request re-fetch       │      │
//!                    │       ▼                            ▼      │
//!                    │  ┌─────────┐                  ┌─────────┐ │
//!   Client Response  │  │  store  │                  │envelope │ │
//!   ◀────────────────┼──│ (MySQL) │                  │(always  │ │
//!                    │  └─────────┘                  │ HTTP200)│ │
//!                    │                               └─────────┘ │
//!                    └────────────────────────────────────────────┘
//! ```
//!
//! Startup is fatal on a store connection or route-list failure; once
//! listening, no per-request error can take the process down.

use std::sync::Arc;

use tokio::net::TcpListener;

use exec_gateway::config;
use exec_gateway::exec::SshCommandRunner;
use exec_gateway::observability::logging;
use exec_gateway::store::{MySqlRouteStore, RouteStore};
use exec_gateway::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("exec-gateway v0.1.0 starting");

    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.bind_address,
        store_host = %config.store.host,
        store_database = %config.store.database,
        "Configuration loaded"
    );

    // Startup-fatal: store unreachable or route list unavailable.
    let store = MySqlRouteStore::connect(&config.store, config.timeouts.store_fetch()).await?;
    let routes = store.list_routes().await?;

    tracing::info!(route_count = routes.len(), "Route definitions loaded");

    let runner = SshCommandRunner::new(
        config.timeouts.ssh_connect(),
        config.timeouts.ssh_command(),
    );

    let server = HttpServer::new(&routes, Arc::new(store), Arc::new(runner))?;

    let listener = TcpListener::bind(&config.bind_address).await?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
