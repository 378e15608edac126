//! User lifecycle management.
//!
//! Creates and deletes OS user accounts by invoking the system `useradd`,
//! `userdel`, and `id` utilities. The OS account database is the only
//! source of truth: nothing is cached between calls, and every operation
//! is an independent subprocess round trip.

use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::AdminError;
use crate::executor::{CommandExecutor, Execute};
use crate::validation::{is_valid_username, validate_username};

/// Manager for OS user accounts.
///
/// Composes an executor (injected, so tests can substitute a double) and
/// an optional audit logger.
pub struct UserManager {
    executor: Box<dyn Execute>,
    audit: Option<AuditLogger>,
}

impl UserManager {
    /// Build a manager from settings.
    ///
    /// Uses the production [`CommandExecutor`] with the configured timeout
    /// and opens the audit log if auditing is enabled.
    pub fn new(settings: &Settings) -> Result<Self, AdminError> {
        let executor =
            CommandExecutor::new(Duration::from_secs(settings.command.timeout_seconds));
        let audit = if settings.audit.enabled {
            Some(AuditLogger::new(&settings.audit.log_path)?)
        } else {
            None
        };

        Ok(Self {
            executor: Box::new(executor),
            audit,
        })
    }

    /// Build a manager around a specific executor, without auditing.
    pub fn with_executor(executor: Box<dyn Execute>) -> Self {
        Self {
            executor,
            audit: None,
        }
    }

    /// Attach an audit logger to this manager.
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Check whether a name matches the accepted username format.
    ///
    /// Pure check; no subprocess is involved.
    pub fn is_valid_username(&self, name: &str) -> bool {
        is_valid_username(name)
    }

    /// Check whether a user account currently exists.
    ///
    /// Probes the OS with `id -u`. Any string may be probed; the name is
    /// not validated first.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ExecutionFailed`] if the probe itself could
    /// not run.
    pub fn user_exists(&self, name: &str) -> Result<bool, AdminError> {
        let result = self.executor.execute("id", &["-u", name], false)?;
        Ok(result.success)
    }

    /// Create a new user account.
    ///
    /// # Errors
    ///
    /// - [`AdminError::InvalidUsername`] if the name fails the format check
    /// - [`AdminError::UserAlreadyExists`] if the account is already present
    /// - [`AdminError::CommandFailed`] if `useradd` exits nonzero
    pub fn create_user(&self, name: &str) -> Result<(), AdminError> {
        info!(username = %name, "Creating user");

        let start = Instant::now();
        let result = self.create_user_inner(name);
        self.record_audit("user.create", name, &result, start.elapsed());
        result
    }

    fn create_user_inner(&self, name: &str) -> Result<(), AdminError> {
        if let Err(e) = validate_username(name) {
            error!(username = %name, "Invalid username");
            return Err(e);
        }

        if self.user_exists(name)? {
            error!(username = %name, "User already exists");
            return Err(AdminError::UserAlreadyExists {
                username: name.to_string(),
            });
        }

        self.executor.execute("sudo", &["useradd", name], true)?;

        info!(username = %name, "User created successfully");
        Ok(())
    }

    /// Delete an existing user account.
    ///
    /// The name is not format-validated: deletion only requires that the
    /// account exists.
    ///
    /// # Errors
    ///
    /// - [`AdminError::UserNotFound`] if the account is absent
    /// - [`AdminError::CommandFailed`] if `userdel` exits nonzero
    pub fn delete_user(&self, name: &str) -> Result<(), AdminError> {
        info!(username = %name, "Deleting user");

        let start = Instant::now();
        let result = self.delete_user_inner(name);
        self.record_audit("user.delete", name, &result, start.elapsed());
        result
    }

    fn delete_user_inner(&self, name: &str) -> Result<(), AdminError> {
        if !self.user_exists(name)? {
            error!(username = %name, "User does not exist");
            return Err(AdminError::UserNotFound {
                username: name.to_string(),
            });
        }

        self.executor.execute("sudo", &["userdel", name], true)?;

        info!(username = %name, "User deleted successfully");
        Ok(())
    }

    /// Write an audit entry for a finished mutation, if auditing is on.
    ///
    /// Audit write failures are logged and swallowed; they never fail the
    /// operation itself.
    fn record_audit(
        &self,
        operation: &str,
        name: &str,
        result: &Result<(), AdminError>,
        elapsed: Duration,
    ) {
        let Some(audit) = &self.audit else { return };

        let duration_ms = elapsed.as_millis() as u64;
        let entry = match result {
            Ok(()) => AuditEntry::success(operation, name, duration_ms),
            Err(e) => AuditEntry::failure(operation, name, &e.to_string(), duration_ms),
        };

        if let Err(e) = audit.log(&entry) {
            warn!(error = %e, operation = %operation, "Failed to write audit entry");
        }
    }
}
