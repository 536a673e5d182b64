//! SSH-backed command runner.
//!
//! # Responsibilities
//! - Open a fresh SSH connection per call (TCP connect + password auth)
//! - Run exactly the configured command string, verbatim
//! - Capture stdout and stderr fully
//! - Release the connection on every exit path
//!
//! # Design Decisions
//! - `ServerCheckMethod::NoCheck`: host identity is not verified. The
//!   system this replaces pinned no host keys; that posture is kept.
//! - A connect-phase timeout reports as a connection failure, a
//!   command-phase timeout as an execution failure, so callers see the
//!   same two outcomes the unbounded original produced.

use std::time::Duration;

use async_ssh2_tokio::client::{AuthMethod, Client, ServerCheckMethod};
use async_trait::async_trait;

use crate::exec::types::{
    CommandOutput, CommandRunner, Credential, ExecError, ExecResult, ExecTarget,
};

/// Command runner over one-shot SSH sessions.
pub struct SshCommandRunner {
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl SshCommandRunner {
    pub fn new(connect_timeout: Duration, command_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            command_timeout,
        }
    }

    async fn connect(&self, target: &ExecTarget, password: &str) -> ExecResult<Client> {
        let connect = Client::connect(
            (target.host.as_str(), target.port),
            target.user.as_str(),
            AuthMethod::with_password(password),
            ServerCheckMethod::NoCheck,
        );

        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(client)) => Ok(client),
            Ok(Err(error)) => Err(ExecError::Connect(error.to_string())),
            Err(_) => Err(ExecError::Connect(format!(
                "timed out after {:?}",
                self.connect_timeout
            ))),
        }
    }
}

#[async_trait]
impl CommandRunner for SshCommandRunner {
    async fn run(&self, target: &ExecTarget, command: &str) -> ExecResult<CommandOutput> {
        let password = match &target.credential {
            Credential::Password(password) => password,
            // The handler answers "Not Implement" before reaching the
            // runner; this arm is a backstop, not a reachable path.
            Credential::PrivateKey => {
                return Err(ExecError::Connect("private_key mode not implemented".into()))
            }
        };

        let client = self.connect(target, password).await?;

        // Run the command, then disconnect before inspecting the result
        // so the connection is released on the failure paths too.
        let run = tokio::time::timeout(self.command_timeout, client.execute(command)).await;
        let _ = client.disconnect().await;

        let executed = match run {
            Ok(Ok(executed)) => executed,
            Ok(Err(error)) => return Err(ExecError::Execution(error.to_string())),
            Err(_) => {
                return Err(ExecError::Execution(format!(
                    "timed out after {:?}",
                    self.command_timeout
                )))
            }
        };

        if executed.exit_status != 0 {
            return Err(ExecError::Execution(format!(
                "exit status {}",
                executed.exit_status
            )));
        }

        Ok(CommandOutput {
            stdout: executed.stdout,
            stderr: executed.stderr,
        })
    }
}
