//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteDefinition[] (from the store)
//!     → check for duplicates / bad verbs / bad paths
//!     → one axum method route per (method, path)
//!     → Freeze as immutable Router
//!
//! Per request:
//!     axum dispatches to the handler registered for the pair;
//!     the handler captures only the route identity, never its
//!     configuration (that is re-fetched per request)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime; store changes
//!   to the route LIST require a restart
//! - Duplicate (method, path) rows are a startup error, not a silent
//!   last-one-wins overwrite
//! - Paths are registered verbatim; no pattern syntax of our own

pub mod registrar;

pub use registrar::{build_router, check_routes, RegistrarError, RouteKey};
