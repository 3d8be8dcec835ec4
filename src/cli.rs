// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `chronystat`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chronystat",
    version,
    about = "Collect chrony metrics from chronyc and print them as line protocol.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `chronystat.toml` in the current directory is used when
    /// present, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run a single collection cycle and exit with its result.
    #[arg(long)]
    pub once: bool,

    /// Run chronyc through `sudo -n`, regardless of the config file.
    #[arg(long)]
    pub use_sudo: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHRONYSTAT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load config, print the chronyc invocation, but don't run it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
