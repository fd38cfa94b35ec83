//! Error types for confreport operations.
//!
//! This module defines [`ConfReportError`], the error type for the fallible
//! edges of the crate (configuration loading, snapshot persistence, runtime
//! probing), and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Report generation never returns an error; degraded sources and bad
//!   values are represented as data in the evaluated entries
//! - Use `ConfReportError` for outer operations the caller must act on
//! - Use `anyhow::Error` (via `ConfReportError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for confreport operations.
#[derive(Debug, Error)]
pub enum ConfReportError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a recorded runtime or background snapshot.
    #[error("Failed to parse snapshot at {path}: {message}")]
    SnapshotParseError { path: PathBuf, message: String },

    /// The interpreter could not be probed for live runtime data.
    #[error("Runtime probe failed: {message}")]
    RuntimeProbeFailed { message: String },

    /// Requested report category does not exist.
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for confreport operations.
pub type Result<T> = std::result::Result<T, ConfReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ConfReportError::ConfigNotFound {
            path: PathBuf::from("/srv/crm/confreport.yml"),
        };
        assert!(err.to_string().contains("/srv/crm/confreport.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ConfReportError::ConfigParseError {
            path: PathBuf::from("/confreport.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/confreport.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn snapshot_parse_error_displays_path_and_message() {
        let err = ConfReportError::SnapshotParseError {
            path: PathBuf::from("user_privileges/cron.json"),
            message: "expected map".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cron.json"));
        assert!(msg.contains("expected map"));
    }

    #[test]
    fn runtime_probe_failed_displays_message() {
        let err = ConfReportError::RuntimeProbeFailed {
            message: "php: command not found".into(),
        };
        assert!(err.to_string().contains("php: command not found"));
    }

    #[test]
    fn unknown_category_displays_name() {
        let err = ConfReportError::UnknownCategory {
            name: "network".into(),
        };
        assert!(err.to_string().contains("network"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ConfReportError = io_err.into();
        assert!(matches!(err, ConfReportError::Io(_)));
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfReportError = json_err.into();
        assert!(matches!(err, ConfReportError::Json(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ConfReportError::UnknownCategory {
                name: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
