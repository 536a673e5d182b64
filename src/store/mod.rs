//! Route store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     MySQL `path_mapping` table
//!         → list_routes()
//!         → Vec<RouteDefinition> (method, path pairs)
//!         → routing registrar (compiled once, immutable)
//!
//! Per request:
//!     (method, path)
//!         → route_config()
//!         → RouteSpec (token + SSH settings, fetched fresh, never cached)
//! ```
//!
//! # Design Decisions
//! - `RouteStore` is a trait so tests can substitute an in-memory store
//! - route_config demands exactly one row: zero is Missing, several is
//!   Ambiguous; both surface as per-request internal errors, not aborts
//! - No caching: edits to stored rows take effect on the next request,
//!   while added/removed routes still require a restart

pub mod access;
pub mod types;

pub use access::MySqlRouteStore;
pub use types::{RouteDefinition, RouteSpec, RouteStore, StoreError, StoreResult};
