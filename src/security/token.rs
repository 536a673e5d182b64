//! Token-based authorization gate.
//!
//! # Responsibilities
//! - Classify the stored `token_type` into an authorization strategy
//! - Decide per request whether the caller may proceed

use axum::http::{header, HeaderMap};

/// Per-route authorization strategy, classified from the stored
/// `token_type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMode {
    /// No check; every caller is allowed.
    Open,

    /// Reserved mode; requests are answered "Not Implement".
    Bearer,

    /// Reserved mode; requests are answered "Not Implement".
    Custom,

    /// Shared secret compared against the `Authorization` header.
    StaticSecret(String),
}

/// Outcome of the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to execution.
    Allow,

    /// Caller did not present the expected credential.
    Unauthorized,

    /// The route is configured with a reserved, unimplemented mode.
    NotImplemented,
}

impl TokenMode {
    /// Classify a stored (token_type, token_value) pair.
    ///
    /// Any `token_type` other than the three named modes means static
    /// shared secret, with `token_value` as the expected credential.
    pub fn classify(token_type: &str, token_value: &str) -> Self {
        match token_type {
            "open" => Self::Open,
            "bearer" => Self::Bearer,
            "custom" => Self::Custom,
            _ => Self::StaticSecret(token_value.to_string()),
        }
    }

    /// Decide whether a request may proceed.
    ///
    /// Static-secret mode requires the first `Authorization` header value
    /// to equal the stored secret exactly; an absent or non-UTF-8 header
    /// is Unauthorized.
    pub fn authorize(&self, headers: &HeaderMap) -> Decision {
        match self {
            Self::Open => Decision::Allow,
            Self::Bearer | Self::Custom => Decision::NotImplemented,
            Self::StaticSecret(expected) => {
                let presented = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok());

                match presented {
                    Some(value) if value == expected => Decision::Allow,
                    _ => Decision::Unauthorized,
                }
            }
        }
    }
}
