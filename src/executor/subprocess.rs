//! Synchronous subprocess execution.
//!
//! Runs system utilities with:
//! - No shell interpretation (direct exec with an argument vector)
//! - Captured stdout/stderr and exit code
//! - Optional fail-on-nonzero-exit semantics
//! - A kill-on-deadline timeout

use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::error::AdminError;

/// Result of a subprocess execution.
///
/// Produced once per execution and discarded after the caller inspects it.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
    /// The exit code, if available. `None` when the child was killed by a
    /// signal.
    pub exit_code: Option<i32>,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Contract for running system utilities.
///
/// `check` selects the failure semantics: when true, a nonzero exit code
/// becomes [`AdminError::CommandFailed`] carrying the captured stderr; when
/// false, the result is returned regardless of exit code and the caller
/// inspects it. Failure to run the subprocess at all is an error in both
/// modes.
pub trait Execute: Send + Sync {
    /// Run `program` with `args` and wait for completion.
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        check: bool,
    ) -> Result<CommandResult, AdminError>;
}

/// Production executor.
///
/// Spawns the program directly (arguments are never passed through a
/// shell) and polls it to completion, killing it past the configured
/// deadline.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl CommandExecutor {
    /// Create an executor with the given per-command deadline.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl Execute for CommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        check: bool,
    ) -> Result<CommandResult, AdminError> {
        debug!(
            program = %program,
            args = ?args,
            timeout_secs = self.timeout.as_secs(),
            "Executing command"
        );

        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            error!(program = %program, error = %e, "Failed to spawn command");
            AdminError::ExecutionFailed {
                message: format!("Failed to spawn {}: {}", program, e),
            }
        })?;

        let start = Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            match child.try_wait() {
                Ok(Some(_status)) => {
                    let output = child.wait_with_output().map_err(|e| {
                        error!(program = %program, error = %e, "Failed to collect command output");
                        AdminError::ExecutionFailed {
                            message: format!("Failed to get output from {}: {}", program, e),
                        }
                    })?;
                    let result = CommandResult::from_output(output);
                    debug!(
                        success = result.success,
                        exit_code = ?result.exit_code,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Command completed"
                    );

                    if check && !result.success {
                        error!(
                            program = %program,
                            args = ?args,
                            exit_code = ?result.exit_code,
                            stderr = %result.stderr.trim(),
                            "Command failed"
                        );
                        return Err(AdminError::CommandFailed {
                            exit_code: result.exit_code.unwrap_or(-1),
                            stderr: result.stderr,
                        });
                    }
                    return Ok(result);
                }
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        error!(
                            program = %program,
                            timeout_secs = self.timeout.as_secs(),
                            "Command timed out, killing"
                        );
                        if let Err(e) = child.kill() {
                            warn!(error = %e, "Failed to kill timed-out process");
                        }
                        // Reap the zombie process
                        let _ = child.wait();
                        return Err(AdminError::Timeout {
                            timeout_secs: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(poll_interval);
                }
                Err(e) => {
                    return Err(AdminError::ExecutionFailed {
                        message: format!("Failed to check process status: {}", e),
                    });
                }
            }
        }
    }
}
