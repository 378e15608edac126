//! Configuration settings for the administration layer.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AdminError;

/// Log file used by the production profile.
const PRODUCTION_LOG_FILE: &str = "usradm.log";

/// Main configuration structure.
///
/// Passed explicitly at startup; there is no hidden global configuration
/// state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub command: CommandConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append-only log file; records go to stderr when absent.
    pub file: Option<PathBuf>,
}

/// Command execution configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Deadline for a single subprocess, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Path to the audit log file.
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

// Default value functions

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("usradm-audit.log")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AdminError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| AdminError::Config {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build settings from the `ENV` environment variable.
    ///
    /// `ENV=production` selects the append-only log file at info level;
    /// any other value (including unset) selects stderr at debug level.
    pub fn from_env() -> Self {
        let env = std::env::var("ENV").unwrap_or_else(|_| "development".to_string());
        Self::for_environment(&env)
    }

    /// Settings for a named environment profile.
    pub fn for_environment(env: &str) -> Self {
        let logging = if env == "production" {
            LoggingConfig {
                level: "info".to_string(),
                file: Some(PathBuf::from(PRODUCTION_LOG_FILE)),
            }
        } else {
            LoggingConfig::default()
        };

        Self {
            logging,
            ..Self::default()
        }
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), AdminError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(AdminError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        if self.command.timeout_seconds == 0 {
            return Err(AdminError::Config {
                message: "Command timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.file.is_none());
        assert_eq!(settings.command.timeout_seconds, 60);
        assert!(!settings.audit.enabled);
    }

    #[test]
    fn test_production_profile() {
        let settings = Settings::for_environment("production");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(
            settings.logging.file,
            Some(PathBuf::from(PRODUCTION_LOG_FILE))
        );
    }

    #[test]
    fn test_development_profile() {
        let settings = Settings::for_environment("development");
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.file.is_none());

        // Unknown profiles fall back to the development defaults.
        let settings = Settings::for_environment("staging");
        assert!(settings.logging.file.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("usradm.toml");
        std::fs::write(
            &path,
            r#"
[logging]
level = "warn"
file = "/var/log/usradm/usradm.log"

[command]
timeout_seconds = 10

[audit]
enabled = true
log_path = "/var/log/usradm/audit.log"
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.command.timeout_seconds, 10);
        assert!(settings.audit.enabled);
    }

    #[test]
    fn test_load_rejects_invalid_level() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("usradm.toml");
        std::fs::write(&path, "[logging]\nlevel = \"verbose\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, AdminError::Config { .. }));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("usradm.toml");
        std::fs::write(&path, "[command]\ntimeout_seconds = 0\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, AdminError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/usradm.toml").unwrap_err();
        assert!(matches!(err, AdminError::Config { .. }));
    }
}
