//! Per-request pipeline.
//!
//! # Responsibilities
//! - Re-fetch the route's configuration from the store
//! - Run the authorization gate
//! - Dispatch to the command runner
//! - Convert every outcome into the response envelope
//!
//! # Design Decisions
//! - Request body and query string are never consumed: the command is
//!   a static string from configuration
//! - Every error is recovered here and becomes an envelope; nothing a
//!   single request does can take the process down

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::exec::{Credential, ExecError, ExecTarget};
use crate::http::response::Envelope;
use crate::http::server::AppState;
use crate::routing::RouteKey;
use crate::security::{Decision, TokenMode};

/// Handle one request for a registered route.
pub async fn handle_route(state: AppState, route: Arc<RouteKey>, headers: HeaderMap) -> Envelope {
    let spec = match state.store.route_config(&route.method, &route.path).await {
        Ok(spec) => spec,
        Err(error) => {
            tracing::error!(
                method = %route.method,
                path = %route.path,
                error = %error,
                "Route configuration fetch failed"
            );
            return Envelope::internal_error();
        }
    };

    let mode = TokenMode::classify(&spec.token_type, &spec.token_value);
    match mode.authorize(&headers) {
        Decision::Allow => {}
        Decision::Unauthorized => {
            tracing::debug!(method = %route.method, path = %route.path, "Request not authorized");
            return Envelope::not_authorized();
        }
        Decision::NotImplemented => {
            return Envelope::not_implemented();
        }
    }

    let target = match ExecTarget::from_spec(&spec) {
        Ok(target) => target,
        Err(error) => {
            tracing::error!(
                method = %route.method,
                path = %route.path,
                error = %error,
                "Route configuration row is unusable"
            );
            return Envelope::internal_error();
        }
    };

    // Reserved credential mode: answered before any connection attempt.
    if target.credential == Credential::PrivateKey {
        return Envelope::not_implemented();
    }

    tracing::debug!(
        method = %route.method,
        path = %route.path,
        host = %target.host,
        port = target.port,
        "Executing remote command"
    );

    match state.runner.run(&target, &spec.ssh_command).await {
        Ok(output) => Envelope::success(output.message()),
        Err(ExecError::Connect(error)) => {
            tracing::warn!(
                method = %route.method,
                path = %route.path,
                host = %target.host,
                error = %error,
                "Remote connection failed"
            );
            Envelope::remote_failed()
        }
        Err(ExecError::Execution(error)) => {
            tracing::warn!(
                method = %route.method,
                path = %route.path,
                host = %target.host,
                error = %error,
                "Remote command failed"
            );
            Envelope::execute_failed()
        }
        Err(error @ ExecError::InvalidPort(_)) => {
            tracing::error!(method = %route.method, path = %route.path, error = %error, "Unusable execution target");
            Envelope::internal_error()
        }
    }
}
