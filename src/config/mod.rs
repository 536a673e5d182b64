//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (DB_*, BIND_ADDR, *_TIMEOUT_SECS)
//!     → loader.rs (read & parse)
//!     → GatewayConfig (validated, immutable)
//!     → shared by value to the subsystems that need a slice of it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Store credentials are required; everything else has defaults
//! - Route definitions are NOT part of this config: they live in the
//!   external store and are loaded by the store subsystem

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::GatewayConfig;
pub use schema::StoreConfig;
pub use schema::TimeoutConfig;
