//! Execution target, output, and error definitions.

use async_trait::async_trait;
use thiserror::Error;

use crate::store::RouteSpec;

/// Remote credential mode, classified from `ssh_authorize_type`.
///
/// Any value other than "private_key" means password authentication,
/// with `ssh_authorize_value` as the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Password authentication.
    Password(String),

    /// Reserved mode; requests are answered "Not Implement" before any
    /// connection is attempted.
    PrivateKey,
}

/// Where and as whom to run the remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecTarget {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub credential: Credential,
}

impl ExecTarget {
    /// Build a target from a stored route configuration.
    ///
    /// The schema stores the port as text; a non-numeric port is a bad
    /// configuration row, surfaced as an internal error for the request.
    pub fn from_spec(spec: &RouteSpec) -> Result<Self, ExecError> {
        let port = spec
            .ssh_port
            .parse::<u16>()
            .map_err(|_| ExecError::InvalidPort(spec.ssh_port.clone()))?;

        let credential = if spec.ssh_authorize_type == "private_key" {
            Credential::PrivateKey
        } else {
            Credential::Password(spec.ssh_authorize_value.clone())
        };

        Ok(Self {
            host: spec.ssh_host.clone(),
            port,
            user: spec.ssh_user.clone(),
            credential,
        })
    }
}

/// Captured output of one remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Select the stream reported back to the caller.
    ///
    /// Non-empty stderr wins over stdout even when the command exited
    /// zero, so a successful command that warns on stderr reports the
    /// warning instead of its stdout. This mirrors the system being
    /// replaced exactly; callers depend on the precedence.
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Errors that can occur while executing a remote command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The stored port column did not parse as a port number.
    #[error("invalid ssh_port in route configuration: {0:?}")]
    InvalidPort(String),

    /// TCP connect or SSH authentication failed, or timed out.
    #[error("connection to remote host failed: {0}")]
    Connect(String),

    /// The command could not be run, timed out, or exited non-zero.
    #[error("remote command failed: {0}")]
    Execution(String),
}

/// Result type for execution operations.
pub type ExecResult<T> = Result<T, ExecError>;

/// One-shot remote command execution.
///
/// Implementations own the whole connection lifecycle: a fresh
/// connection per call, released on every exit path.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, target: &ExecTarget, command: &str) -> ExecResult<CommandOutput>;
}
