//! Input validation module.
//!
//! Provides the username format validator applied before privileged
//! account operations.

mod username;

pub use username::{is_valid_username, validate_username};
