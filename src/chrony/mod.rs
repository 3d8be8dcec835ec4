// src/chrony/mod.rs

//! chronyc collection core.
//!
//! One collection cycle is:
//! 1. [`invoker`] runs `chronyc -c -m <commands...>` once;
//! 2. [`sequencer`] walks the combined output, handing each line to the
//!    matching [`extract`] function;
//! 3. every parsed line becomes a [`record::Record`] passed to an
//!    [`Emitter`](crate::emit::Emitter).
//!
//! [`Collector`] ties the three together around a [`CommandExecutor`].

pub mod extract;
pub mod invoker;
pub mod record;
pub mod sequencer;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::emit::Emitter;
use crate::errors::{ChronyError, Result};
use crate::exec::{CommandExecutor, Invocation};
use crate::types::{Subcommand, default_commands};

pub use extract::{Extracted, ParseError};
pub use record::{FieldValue, MEASUREMENT, Record};
pub use sequencer::{LineOutcome, ParseSummary, SequenceError, Sequencer, parse_output};

/// What to ask chronyc for and how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Subcommands, in the order they are passed to chronyc.
    pub commands: Vec<Subcommand>,
    /// Run chronyc through `sudo -n`.
    pub use_sudo: bool,
    /// Resolved chronyc path; `None` when it could not be found.
    pub chronyc_path: Option<PathBuf>,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            commands: default_commands(),
            use_sudo: false,
            chronyc_path: None,
        }
    }
}

/// Runs chronyc and turns its output into records.
pub struct Collector<E: CommandExecutor> {
    settings: CollectorSettings,
    executor: E,
    timeout: Duration,
}

impl<E: CommandExecutor> fmt::Debug for Collector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("settings", &self.settings)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> Collector<E> {
    pub fn new(settings: CollectorSettings, executor: E) -> Self {
        Self {
            settings,
            executor,
            timeout: invoker::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The invocation a cycle would run, or `ToolNotFound`.
    pub fn invocation(&self) -> Result<Invocation> {
        let path = self
            .settings
            .chronyc_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ChronyError::ToolNotFound)?;
        Ok(invoker::build_invocation(
            path,
            self.settings.use_sudo,
            &self.settings.commands,
        ))
    }

    /// Run one collection cycle.
    ///
    /// Records are emitted as they are parsed; if the cycle fails part way
    /// through the output, records for the earlier lines have already been
    /// emitted.
    pub async fn gather(&self, emitter: &mut dyn Emitter) -> Result<ParseSummary> {
        let output = invoker::invoke(
            &self.executor,
            self.settings.chronyc_path.as_deref(),
            self.settings.use_sudo,
            &self.settings.commands,
            self.timeout,
        )
        .await?;

        let summary = parse_output(&self.settings.commands, &output, emitter)?;
        info!(
            emitted = summary.emitted,
            dropped = summary.dropped,
            "chronyc collection finished"
        );
        Ok(summary)
    }
}
