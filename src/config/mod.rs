// src/config/mod.rs

//! Configuration loading and validation for chronystat.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and discover chronyc (`loader.rs`).
//! - Validate and type the raw values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{discover_chronyc, load_and_validate, load_from_path, load_or_default};
pub use model::{AgentSection, ChronycSection, ConfigFile, RawConfigFile};
