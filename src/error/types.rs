//! Error types for the administration layer.

use thiserror::Error;

/// Main error type for administrative operations.
///
/// Every error is raised to the immediate caller; nothing in this crate
/// retries or recovers internally.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Username failed the format check.
    #[error("Invalid username: {username}")]
    InvalidUsername { username: String },

    /// Creation was requested for an account that already exists.
    #[error("User {username} already exists.")]
    UserAlreadyExists { username: String },

    /// Deletion was requested for an account that does not exist.
    #[error("User {username} does not exist.")]
    UserNotFound { username: String },

    /// A system utility exited nonzero when success was required.
    ///
    /// Carries the captured stderr for diagnostics.
    #[error("Command failed with exit code {exit_code}: {stderr}")]
    CommandFailed { exit_code: i32, stderr: String },

    /// The subprocess mechanism itself could not run the command.
    #[error("Command execution failed: {message}")]
    ExecutionFailed { message: String },

    /// A subprocess exceeded the executor deadline.
    #[error("Command timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Configuration load or validation failure.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for administrative operations.
pub type AdminResult<T> = Result<T, AdminError>;
