// src/chrony/sequencer.rs

//! Re-synchronizing walk over chronyc's concatenated output.
//!
//! chronyc is run once with several subcommands and prints their outputs
//! back to back with nothing marking where one ends and the next begins.
//! The [`Sequencer`] recovers the boundaries from line shape alone:
//!
//! - single-line commands (`tracking`, `serverstats`) claim exactly one
//!   line and must parse, otherwise the whole output is rejected;
//! - list commands (`sources`, `sourcestats`, `ntpdata`) claim lines for as
//!   long as the field count matches, and may claim none at all. The first
//!   line with the wrong field count ends the list and is retried against
//!   the next pending command.
//!
//! The state is `(pending commands, current command)`; lines are fed in one
//! at a time. This keeps the walk testable without running any process.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, warn};

use crate::chrony::extract::ParseError;
use crate::chrony::record::Record;
use crate::emit::Emitter;
use crate::types::Subcommand;

/// Failure of a whole parse pass. Any of these aborts the collection cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    #[error("wrong field count for mandatory command '{command}': {source}")]
    MandatoryFieldCount {
        command: Subcommand,
        #[source]
        source: ParseError,
    },

    #[error("commands done, but there is more output: {lines:?}")]
    ExcessOutput { lines: Vec<String> },

    #[error("not enough output for remaining commands: {}", names(.remaining))]
    InsufficientOutput { remaining: Vec<Subcommand> },
}

fn names(commands: &[Subcommand]) -> String {
    commands
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What happened to a single line fed into the sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The line parsed; this record should be emitted.
    Emitted(Record),
    /// The line had the right shape but a bad value. It is dropped and the
    /// current command stays active.
    Dropped(ParseError),
    /// Every command is used up; the line belongs to nobody.
    Unclaimed,
}

/// Finite-state walk matching output lines to requested subcommands.
#[derive(Debug, Clone)]
pub struct Sequencer {
    pending: VecDeque<Subcommand>,
    current: Option<Subcommand>,
}

impl Sequencer {
    pub fn new(commands: &[Subcommand]) -> Self {
        Self {
            pending: commands.iter().copied().collect(),
            current: None,
        }
    }

    /// Command the next line will be tried against first, if one is active.
    pub fn current(&self) -> Option<Subcommand> {
        self.current
    }

    /// Commands not yet started.
    pub fn pending(&self) -> impl Iterator<Item = Subcommand> + '_ {
        self.pending.iter().copied()
    }

    /// Match one line against the current command, moving on to later
    /// commands while the line's field count does not fit.
    ///
    /// Every retry pops a pending command, so this loops at most once per
    /// pending command.
    pub fn feed(&mut self, line: &str) -> Result<LineOutcome, SequenceError> {
        let fields: Vec<&str> = line.split(',').collect();

        loop {
            let command = match self.current {
                Some(command) => command,
                None => match self.pending.pop_front() {
                    Some(command) => {
                        self.current = Some(command);
                        command
                    }
                    None => return Ok(LineOutcome::Unclaimed),
                },
            };

            match command.extract(&fields) {
                Ok(extracted) => {
                    if command.is_single_line() {
                        self.current = None;
                    }
                    let mut tags = extracted.tags;
                    tags.insert("command".to_string(), command.as_str().to_string());
                    return Ok(LineOutcome::Emitted(Record::new(extracted.fields, tags)));
                }
                Err(err) if err.is_field_count() => {
                    if command.is_single_line() {
                        return Err(SequenceError::MandatoryFieldCount {
                            command,
                            source: err,
                        });
                    }
                    debug!(
                        command = %command,
                        error = %err,
                        "line does not belong to list command; trying next command"
                    );
                    self.current = None;
                }
                Err(err) => {
                    warn!(command = %command, error = %err, "dropping malformed chronyc line");
                    return Ok(LineOutcome::Dropped(err));
                }
            }
        }
    }

    /// Check that nothing mandatory is still waiting once output runs out.
    pub fn finish(self) -> Result<(), SequenceError> {
        let remaining: Vec<Subcommand> = self.pending.into_iter().collect();
        match remaining.iter().position(|c| c.is_single_line()) {
            Some(first) => Err(SequenceError::InsufficientOutput {
                remaining: remaining[first..].to_vec(),
            }),
            None => Ok(()),
        }
    }
}

/// Counts from one parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub emitted: usize,
    pub dropped: usize,
}

/// Split chronyc output into lines, ignoring trailing line endings.
pub fn output_lines(output: &str) -> Vec<&str> {
    output
        .trim_end_matches(|c: char| c == '\n' || c == '\r')
        .lines()
        .collect()
}

/// Parse the combined output of one chronyc run and emit a record per
/// parsed line.
///
/// Records are emitted as lines are parsed, so on an error the records for
/// earlier lines have already been handed to `emitter`.
pub fn parse_output(
    commands: &[Subcommand],
    output: &str,
    emitter: &mut dyn Emitter,
) -> Result<ParseSummary, SequenceError> {
    let lines = output_lines(output);
    let mut sequencer = Sequencer::new(commands);
    let mut summary = ParseSummary::default();

    for (index, line) in lines.iter().enumerate() {
        match sequencer.feed(line)? {
            LineOutcome::Emitted(record) => {
                emitter.record(record);
                summary.emitted += 1;
            }
            LineOutcome::Dropped(_) => summary.dropped += 1,
            LineOutcome::Unclaimed => {
                return Err(SequenceError::ExcessOutput {
                    lines: lines[index..].iter().map(|l| l.to_string()).collect(),
                });
            }
        }
    }

    sequencer.finish()?;
    Ok(summary)
}
