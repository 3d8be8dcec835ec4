// src/chrony/invoker.rs

//! Building and running the single chronyc invocation of a collection cycle.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::errors::{ChronyError, Result};
use crate::exec::{CommandExecutor, Invocation};
use crate::types::Subcommand;

/// Deadline for one chronyc run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// CSV output (`-c`) and multiple commands per invocation (`-m`).
pub const CHRONYC_FLAGS: [&str; 2] = ["-c", "-m"];

pub const SUDO: &str = "sudo";

/// Never prompt for a password; fail instead.
pub const SUDO_FLAGS: [&str; 1] = ["-n"];

/// Argument vector for running `commands` in one chronyc call.
///
/// `chronyc -c -m tracking sources` or, with `use_sudo`,
/// `sudo -n chronyc -c -m tracking sources`.
pub fn build_invocation(chronyc: &Path, use_sudo: bool, commands: &[Subcommand]) -> Invocation {
    let chronyc = chronyc.to_string_lossy().into_owned();
    let invocation = if use_sudo {
        Invocation::new(SUDO).args(SUDO_FLAGS).arg(chronyc)
    } else {
        Invocation::new(chronyc)
    };

    invocation
        .args(CHRONYC_FLAGS)
        .args(commands.iter().map(|c| c.as_str()))
}

/// Run chronyc once and return its combined output.
///
/// Fails with [`ChronyError::ToolNotFound`] before spawning anything when no
/// chronyc path is known, and with [`ChronyError::Execution`] when the
/// process cannot be spawned, times out, or exits non-zero.
pub async fn invoke(
    executor: &dyn CommandExecutor,
    chronyc: Option<&Path>,
    use_sudo: bool,
    commands: &[Subcommand],
    timeout: Duration,
) -> Result<String> {
    let chronyc = match chronyc {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(ChronyError::ToolNotFound),
    };

    let invocation = build_invocation(chronyc, use_sudo, commands);
    debug!(cmd = %invocation, "invoking chronyc");

    let output = executor
        .run(&invocation, timeout)
        .await
        .map_err(|e| ChronyError::Execution {
            argv: invocation.to_string(),
            reason: e.to_string(),
            output: String::new(),
        })?;

    if !output.is_success() {
        let reason = match output.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        };
        return Err(ChronyError::Execution {
            argv: invocation.to_string(),
            reason,
            output: output.combined,
        });
    }

    Ok(output.combined)
}
