//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router from the startup route list
//! - Wire up middleware (tracing, request IDs)
//! - Serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - `AppState` carries trait objects for the store and the runner so
//!   the whole pipeline is testable with in-memory fakes
//! - No request timeout layer at the transport: remote commands may
//!   legitimately run long, and the execution adapter carries its own
//!   bounds

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::http::request::MakeRequestUuid;

use crate::exec::CommandRunner;
use crate::routing::{build_router, RegistrarError};
use crate::store::{RouteDefinition, RouteStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RouteStore>,
    pub runner: Arc<dyn CommandRunner>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server from the startup route list.
    pub fn new(
        routes: &[RouteDefinition],
        store: Arc<dyn RouteStore>,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self, RegistrarError> {
        let state = AppState { store, runner };
        let router = build_router(routes, state)?
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The built router, for driving the pipeline in tests.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
