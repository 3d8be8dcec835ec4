#![allow(dead_code)]

use std::path::PathBuf;

use chronystat::chrony::{Collector, CollectorSettings};
use chronystat::config::RawConfigFile;
use chronystat::types::Subcommand;

use crate::fake_executor::FakeExecutor;

/// Builder for `CollectorSettings` to simplify test setup.
///
/// Defaults to a chronyc path of `chronyc` so no PATH lookup happens.
pub struct SettingsBuilder {
    settings: CollectorSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: CollectorSettings {
                commands: Vec::new(),
                use_sudo: false,
                chronyc_path: Some(PathBuf::from("chronyc")),
            },
        }
    }

    pub fn command(mut self, command: Subcommand) -> Self {
        self.settings.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: &[Subcommand]) -> Self {
        self.settings.commands.extend_from_slice(commands);
        self
    }

    pub fn use_sudo(mut self, val: bool) -> Self {
        self.settings.use_sudo = val;
        self
    }

    pub fn chronyc_path(mut self, path: &str) -> Self {
        self.settings.chronyc_path = Some(PathBuf::from(path));
        self
    }

    pub fn without_chronyc(mut self) -> Self {
        self.settings.chronyc_path = None;
        self
    }

    pub fn build(self) -> CollectorSettings {
        self.settings
    }

    pub fn collector(self, executor: FakeExecutor) -> Collector<FakeExecutor> {
        Collector::new(self.settings, executor)
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawConfigFile`.
pub struct RawConfigBuilder {
    config: RawConfigFile,
}

impl RawConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn commands(mut self, names: &[&str]) -> Self {
        self.config.chronyc.commands = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.config.chronyc.path = Some(PathBuf::from(path));
        self
    }

    pub fn use_sudo(mut self, val: bool) -> Self {
        self.config.chronyc.use_sudo = val;
        self
    }

    pub fn interval(mut self, secs: u64) -> Self {
        self.config.agent.interval = secs;
        self
    }

    pub fn build(self) -> RawConfigFile {
        self.config
    }
}

impl Default for RawConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
