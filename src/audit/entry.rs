//! Audit entry types.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// A single audit log entry.
///
/// Records one privileged account operation: what was attempted, against
/// which username, how it ended, and how long it took.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// RFC 3339 timestamp when the operation finished.
    pub timestamp: String,
    /// The operation that was performed (e.g., "user.create").
    pub operation: String,
    /// The username the operation targeted.
    pub username: String,
    /// Outcome of the operation.
    pub result: AuditOutcome,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
}

impl AuditEntry {
    /// Create an entry for a successful operation.
    pub fn success(operation: &str, username: &str, duration_ms: u64) -> Self {
        Self {
            timestamp: now_rfc3339(),
            operation: operation.to_string(),
            username: username.to_string(),
            result: AuditOutcome::Success,
            duration_ms,
        }
    }

    /// Create an entry for a failed operation.
    pub fn failure(operation: &str, username: &str, error: &str, duration_ms: u64) -> Self {
        Self {
            timestamp: now_rfc3339(),
            operation: operation.to_string(),
            username: username.to_string(),
            result: AuditOutcome::Failure {
                error: error.to_string(),
            },
            duration_ms,
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Outcome of an operation for audit purposes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuditOutcome {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Failure {
        /// The error message.
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let entry = AuditEntry::success("user.create", "john", 15);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"user.create\""));
        assert!(json.contains("\"username\":\"john\""));
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"duration_ms\":15"));
    }

    #[test]
    fn test_failure_serialization() {
        let entry = AuditEntry::failure("user.delete", "ghost", "User ghost does not exist.", 3);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
        assert!(json.contains("\"error\":\"User ghost does not exist.\""));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let entry = AuditEntry::success("user.create", "john", 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }
}
