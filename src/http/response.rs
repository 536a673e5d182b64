//! Response envelope.
//!
//! # Responsibilities
//! - Map every handler outcome to one JSON body shape
//! - Pin the transport-level status to 200 on every handled route
//!
//! # Design Decisions
//! - The semantic result lives ONLY in the body's `status` field; the
//!   transport status is part of the client contract and stays 200 even
//!   for failures. Callers must inspect the body.
//! - Message strings are fixed and match the system this replaces
//!   byte-for-byte; scripts parse them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Uniform response body for every route outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Semantic HTTP status: 200, 401, 500, or 501.
    pub status: u16,

    /// Human-readable outcome, or the command output on success.
    pub message: String,
}

impl Envelope {
    /// Successful execution; `message` is the selected output stream.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
        }
    }

    /// Route is configured with a reserved, unimplemented mode.
    pub fn not_implemented() -> Self {
        Self {
            status: StatusCode::NOT_IMPLEMENTED.as_u16(),
            message: "Not Implement".to_string(),
        }
    }

    /// Caller failed the authorization gate.
    pub fn not_authorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            message: "Not Authorize".to_string(),
        }
    }

    /// SSH connect or authenticate failed.
    pub fn remote_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: "Failed to remote server".to_string(),
        }
    }

    /// Remote command could not run or exited non-zero.
    pub fn execute_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: "Failed execute command".to_string(),
        }
    }

    /// Per-request configuration problem (missing/ambiguous/bad row).
    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        // Transport status pinned to 200; see module docs.
        (StatusCode::OK, Json(self)).into_response()
    }
}
