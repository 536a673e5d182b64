//! Route registration.
//!
//! # Responsibilities
//! - Validate the startup route list (verbs, paths, duplicates)
//! - Register one handler per (method, path) pair
//! - Hand each handler its route identity and nothing else
//!
//! # Design Decisions
//! - Validation is a pure function over the route list, run before any
//!   registration, so a bad row fails startup with a precise error
//! - The registered closure captures an Arc'd RouteKey; the full route
//!   configuration is fetched from the store on every request

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method};
use axum::routing::{on, MethodFilter};
use axum::Router;
use thiserror::Error;

use crate::http::handler::handle_route;
use crate::http::server::AppState;
use crate::store::RouteDefinition;

/// Identity of one registered route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: String,
    pub path: String,
}

/// Errors that can occur while building the routing table.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The store listed the same (method, path) pair more than once.
    #[error("duplicate route definition: {method} {path}")]
    DuplicateRoute { method: String, path: String },

    /// The stored method is not a standard HTTP verb.
    #[error("unsupported HTTP method {method:?} for path {path}")]
    InvalidMethod { method: String, path: String },

    /// The stored path cannot be registered (must start with '/').
    #[error("invalid route path {path:?}")]
    InvalidPath { path: String },
}

/// Validate a route list without registering anything.
pub fn check_routes(routes: &[RouteDefinition]) -> Result<(), RegistrarError> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for def in routes {
        if !def.path.starts_with('/') {
            return Err(RegistrarError::InvalidPath {
                path: def.path.clone(),
            });
        }

        if method_filter(&def.method).is_none() {
            return Err(RegistrarError::InvalidMethod {
                method: def.method.clone(),
                path: def.path.clone(),
            });
        }

        if !seen.insert((def.method.as_str(), def.path.as_str())) {
            return Err(RegistrarError::DuplicateRoute {
                method: def.method.clone(),
                path: def.path.clone(),
            });
        }
    }

    Ok(())
}

/// Compile the route list into an axum router.
pub fn build_router(
    routes: &[RouteDefinition],
    state: AppState,
) -> Result<Router, RegistrarError> {
    check_routes(routes)?;

    let mut router: Router<AppState> = Router::new();

    for def in routes {
        // check_routes already vetted every row.
        let Some(filter) = method_filter(&def.method) else {
            return Err(RegistrarError::InvalidMethod {
                method: def.method.clone(),
                path: def.path.clone(),
            });
        };

        let key = Arc::new(RouteKey {
            method: def.method.clone(),
            path: def.path.clone(),
        });

        tracing::info!(method = %key.method, path = %key.path, "Route registered");

        let handler = move |State(state): State<AppState>, headers: HeaderMap| {
            let key = key.clone();
            async move { handle_route(state, key, headers).await }
        };

        router = router.route(&def.path, on(filter, handler));
    }

    Ok(router.with_state(state))
}

/// Map a stored verb string onto an axum method filter.
fn method_filter(method: &str) -> Option<MethodFilter> {
    let method = Method::from_bytes(method.as_bytes()).ok()?;
    MethodFilter::try_from(method).ok()
}
