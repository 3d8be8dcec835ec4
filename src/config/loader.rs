// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate the
/// command list or look for chronyc. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks the command list (known names, no duplicates, not empty) and
///   the collection interval.
/// - Resolves the chronyc path.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given, else [`default_config_path`] if it exists, else
/// the built-in defaults.
///
/// An explicitly given file must exist.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                load_and_validate(default_path)
            } else {
                debug!("no config file found; using defaults");
                ConfigFile::try_from(RawConfigFile::default())
            }
        }
    }
}

/// `chronystat.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("chronystat.toml")
}

/// Look chronyc up on `PATH`.
pub fn discover_chronyc() -> Option<PathBuf> {
    match which::which("chronyc") {
        Ok(path) => {
            debug!(path = %path.display(), "found chronyc");
            Some(path)
        }
        Err(e) => {
            debug!(error = %e, "chronyc not found on PATH");
            None
        }
    }
}
