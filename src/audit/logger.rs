//! Audit logger for writing audit entries to file.
//!
//! Entries are written as JSON lines (one JSON object per line) for easy
//! parsing by log analysis tools.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::AdminError;

use super::entry::AuditEntry;

/// Logger for audit entries.
///
/// Writes entries to an append-only file. Thread-safe via internal mutex.
pub struct AuditLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl AuditLogger {
    /// Create an audit logger appending to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be opened for appending.
    pub fn new(path: &Path) -> Result<Self, AdminError> {
        if let Some(parent) = path.parent() {
            // A bare filename has an empty parent component.
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(path = %parent.display(), "Creating audit log directory");
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        debug!(path = %path.display(), "Audit logger initialized");

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Log an audit entry.
    ///
    /// Serializes the entry to JSON, writes it as a single line, and syncs
    /// the file for durability.
    pub fn log(&self, entry: &AuditEntry) -> Result<(), AdminError> {
        let json = serde_json::to_string(entry)?;

        let mut file = self.file.lock().map_err(|e| {
            std::io::Error::other(format!("Audit log lock poisoned: {}", e))
        })?;

        writeln!(file, "{}", json)?;

        if let Err(e) = file.sync_data() {
            warn!(error = %e, "Failed to sync audit log");
        }

        Ok(())
    }

    /// Path to the audit log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
