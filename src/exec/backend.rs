// src/exec/backend.rs

//! Pluggable command executor abstraction.
//!
//! The collector talks to a `CommandExecutor` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests.
//!
//! - `TokioExecutor` is the default implementation used by `chronystat`. It
//!   spawns the process with `tokio::process::Command`, captures stdout and
//!   stderr, and kills the child if the deadline passes.
//! - Tests can provide their own `CommandExecutor` that, for example, records
//!   which invocations were requested and returns canned chronyc output.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use super::invocation::Invocation;

/// Output of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Stdout followed by stderr.
    pub combined: String,
    /// Exit code; `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
            exit_code: Some(0),
        }
    }

    pub fn failed(combined: impl Into<String>, exit_code: i32) -> Self {
        Self {
            combined: combined.into(),
            exit_code: Some(exit_code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Reasons a process did not run to completion.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("spawning {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command timed out after {0:?}")]
    TimedOut(Duration),
}

/// Trait abstracting how an external command is run.
///
/// Production code uses [`TokioExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait CommandExecutor: Send + Sync {
    /// Run `invocation` to completion, giving up after `timeout`.
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>>;
}

/// Real executor backend used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

impl CommandExecutor for TokioExecutor {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>> {
        Box::pin(async move {
            debug!(cmd = %invocation, ?timeout, "starting process");

            let mut cmd = Command::new(&invocation.program);
            cmd.args(&invocation.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let child = cmd.spawn().map_err(|source| ExecError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

            // Dropping the wait future on timeout drops the child, which
            // kills it because of `kill_on_drop(true)`.
            let output = tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| ExecError::TimedOut(timeout))?
                .map_err(|source| ExecError::Wait {
                    program: invocation.program.clone(),
                    source,
                })?;

            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            debug!(
                cmd = %invocation,
                exit_code = ?output.status.code(),
                bytes = combined.len(),
                "process exited"
            );

            Ok(CommandOutput {
                combined,
                exit_code: output.status.code(),
            })
        })
    }
}
