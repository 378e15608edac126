//! Error types for the administration layer.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
