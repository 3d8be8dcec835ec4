// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] describes one program + argument vector to run.
//! - [`backend`] provides the `CommandExecutor` trait and the concrete
//!   `TokioExecutor` used in production, which tests replace with a fake
//!   implementation that returns scripted output.

pub mod backend;
pub mod invocation;

pub use backend::{CommandExecutor, CommandOutput, ExecError, TokioExecutor};
pub use invocation::Invocation;
