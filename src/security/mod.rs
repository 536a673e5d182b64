//! Authorization subsystem.
//!
//! # Data Flow
//! ```text
//! RouteSpec.token_type / token_value
//!     → TokenMode::classify (tagged variant)
//!     → authorize(request headers)
//!     → Decision: Allow | Unauthorized | NotImplemented
//! ```
//!
//! # Design Decisions
//! - Tagged variant instead of chained string comparisons so a real
//!   bearer/custom implementation is a local change
//! - A missing Authorization header in static-secret mode is a defined
//!   Unauthorized outcome, never a handler crash
//! - Plain equality on the shared secret; no timing-safe compare, no
//!   expiry, no multi-value header handling (matches the contract)

pub mod token;

pub use token::{Decision, TokenMode};
