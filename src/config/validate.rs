// src/config/validate.rs

use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;

use crate::chrony::CollectorSettings;
use crate::config::loader::discover_chronyc;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ChronyError, Result};
use crate::types::Subcommand;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ChronyError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_agent(&raw)?;
        let commands = parse_commands(&raw.chronyc.commands)?;

        // A missing chronyc is not a load error; collection reports it.
        let chronyc_path = raw.chronyc.path.clone().or_else(discover_chronyc);

        Ok(ConfigFile::new_unchecked(
            Duration::from_secs(raw.agent.interval),
            CollectorSettings {
                commands,
                use_sudo: raw.chronyc.use_sudo,
                chronyc_path,
            },
        ))
    }
}

fn validate_agent(cfg: &RawConfigFile) -> Result<()> {
    if cfg.agent.interval == 0 {
        return Err(ChronyError::ConfigError(
            "[agent].interval must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Turn configured command names into subcommands.
///
/// The list must be non-empty and free of duplicates: chronyc output has no
/// markers, so a repeated command cannot be told apart from its first run.
pub fn parse_commands(names: &[String]) -> Result<Vec<Subcommand>> {
    if names.is_empty() {
        return Err(ChronyError::ConfigError(
            "[chronyc].commands must name at least one command".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut commands = Vec::with_capacity(names.len());
    for name in names {
        let command = Subcommand::from_str(name).map_err(ChronyError::UnknownCommand)?;
        if !seen.insert(command) {
            return Err(ChronyError::ConfigError(format!(
                "[chronyc].commands lists '{command}' more than once"
            )));
        }
        commands.push(command);
    }
    Ok(commands)
}
