//! Configuration module.
//!
//! Handles loading and validating configuration from TOML files, plus the
//! environment-keyed default profiles.

mod settings;

pub use settings::*;
