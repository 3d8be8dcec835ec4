// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::chrony::CollectorSettings;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [agent]
/// interval = 10
///
/// [chronyc]
/// commands = ["tracking", "sources", "sourcestats"]
/// use_sudo = false
/// path = "/usr/bin/chronyc"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub chronyc: ChronycSection,
}

/// `[agent]` section: how often the binary collects.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSection {
    /// Seconds between collection cycles.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

fn default_interval() -> u64 {
    10
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

/// `[chronyc]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ChronycSection {
    /// Subcommands to run, in order. Any of `tracking`, `serverstats`,
    /// `sources`, `sourcestats`, `ntpdata`.
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,

    /// `serverstats` and `ntpdata` need root access to chronyd's unix
    /// socket. sudo must allow running chronyc without a password.
    #[serde(default)]
    pub use_sudo: bool,

    /// Explicit chronyc path; looked up on `PATH` when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_commands() -> Vec<String> {
    crate::types::default_commands()
        .into_iter()
        .map(|c| c.as_str().to_string())
        .collect()
}

impl Default for ChronycSection {
    fn default() -> Self {
        Self {
            commands: default_commands(),
            use_sudo: false,
            path: None,
        }
    }
}

/// Validated configuration.
///
/// Construct via `ConfigFile::try_from(RawConfigFile)`, which checks the
/// command list and resolves the chronyc path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub interval: Duration,
    pub collector: CollectorSettings,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(interval: Duration, collector: CollectorSettings) -> Self {
        Self {
            interval,
            collector,
        }
    }
}
