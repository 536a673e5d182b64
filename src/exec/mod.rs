//! Remote execution subsystem.
//!
//! # Data Flow
//! ```text
//! RouteSpec (ssh_* columns)
//!     → ExecTarget (validated host/port/user/credential)
//!     → CommandRunner::run (fresh connection, one command)
//!     → CommandOutput (stdout + stderr, fully buffered)
//!     → output selection (stderr masks stdout)
//! ```
//!
//! # Design Decisions
//! - One connection per request; no pooling or reuse by contract
//! - Host-key verification is disabled, matching the system this
//!   replaces; changing that posture is out of scope here
//! - Output is buffered fully in memory with no size cap (known risk,
//!   inherited from the contract)
//! - Connect and command phases carry separate timeout bounds mapping
//!   to the connection-failure and execution-failure outcomes

pub mod ssh;
pub mod types;

pub use ssh::SshCommandRunner;
pub use types::{CommandOutput, CommandRunner, Credential, ExecError, ExecResult, ExecTarget};
