//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; level set through `RUST_LOG`
//! - Request IDs (set by the HTTP layer) flow through handler events
//! - No metrics endpoint: responses are the only audit surface by
//!   contract

pub mod logging;
