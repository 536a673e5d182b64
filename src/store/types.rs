//! Store row types and error definitions.

use async_trait::async_trait;
use thiserror::Error;

/// A (method, path) pair naming one exposed endpoint.
///
/// Read once at startup to build the routing table; never mutated at
/// runtime. The pair is the route's identity everywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct RouteDefinition {
    pub method: String,
    pub path: String,
}

/// Full per-route configuration, re-fetched from the store on every
/// request so that edits to existing rows take effect immediately.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RouteSpec {
    /// Authorization mode: "open", "bearer", "custom", or anything else
    /// meaning static shared secret.
    pub token_type: String,

    /// Expected shared secret in static-secret mode.
    pub token_value: String,

    /// Remote credential mode: "private_key" (reserved) or password.
    pub ssh_authorize_type: String,

    /// Password credential in password mode.
    pub ssh_authorize_value: String,

    /// Remote host to connect to.
    pub ssh_host: String,

    /// Remote port, stored as text in the schema.
    pub ssh_port: String,

    /// Remote user to authenticate as.
    pub ssh_user: String,

    /// The exact command to run; static per route, never templated
    /// from request data.
    pub ssh_command: String,
}

/// Errors that can occur while talking to the route store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open a connection to the store.
    #[error("store connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// A query failed at the driver level.
    #[error("store query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// No configuration row exists for the route.
    #[error("no configuration row for {method} {path}")]
    Missing { method: String, path: String },

    /// More than one configuration row matched the route.
    #[error("{count} configuration rows for {method} {path}")]
    Ambiguous {
        method: String,
        path: String,
        count: usize,
    },

    /// The fetch did not complete within the configured bound.
    #[error("store fetch timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to route definitions and per-route configuration.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Fetch every (method, path) pair. Called once at startup;
    /// failure is fatal to the process.
    async fn list_routes(&self) -> StoreResult<Vec<RouteDefinition>>;

    /// Fetch the single configuration row for a route. Called on every
    /// request; zero or multiple matches are errors.
    async fn route_config(&self, method: &str, path: &str) -> StoreResult<RouteSpec>;
}
