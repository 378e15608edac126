//! Command executor module.
//!
//! Synchronous subprocess spawning with captured output, optional
//! fail-on-error semantics, and timeout enforcement.

mod subprocess;

pub use subprocess::{CommandExecutor, CommandResult, Execute};
