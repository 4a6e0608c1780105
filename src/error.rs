//! Error types for campus-helpdesk
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! is [`HelpdeskError`]. Variants fall into three broad groups: validation
//! failures (never persisted), not-found signals (no partial mutation), and
//! storage failures (fatal for the current operation, never retried).

use std::path::PathBuf;
use thiserror::Error;

/// `AlreadyExists` kind reported when initializing over existing data
pub const DATABASE_KIND: &str = "Helpdesk database";

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HelpdeskError>;

/// Errors produced by the helpdesk store, service and CLI
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// Mobile number failed the 10-digit, 6-9 prefix check
    #[error("Invalid mobile number '{0}': expected 10 digits starting with 6-9")]
    InvalidMobile(String),

    /// A required field was empty
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Generic input validation failure
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A category, technician or the database itself already exists
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: String, name: String },

    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    #[error("Backup not found: {timestamp}")]
    BackupNotFound { timestamp: String },

    #[error("Invalid admin credentials")]
    InvalidCredentials,

    /// The backing store could not be read or written
    #[error("Storage unavailable at {}: {reason}", path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Custom(String),
}

impl HelpdeskError {
    /// Create a custom error from any message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Shorthand for a storage failure at `path`
    pub fn storage(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageUnavailable { .. } => {
                "The helpdesk database could not be accessed".to_string()
            },
            Self::InvalidCredentials => "Invalid admin credentials".to_string(),
            _ => self.to_string(),
        }
    }

    /// Hints for fixing the error, if any
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidMobile(_) => vec![
                "Enter a valid 10-digit mobile number, e.g. 9876543210".to_string(),
            ],
            Self::TicketNotFound { .. } => vec![
                "Run 'campus-helpdesk list' to see existing tickets".to_string(),
                "Ticket ids look like TICKET-1001".to_string(),
            ],
            Self::BackupNotFound { .. } => {
                vec!["Run 'campus-helpdesk backup list' to see available snapshots".to_string()]
            },
            Self::StorageUnavailable { path, .. } => vec![
                format!("Check that {} is readable and writable", path.display()),
                "Set HELPDESK__STORAGE__DATA_DIR to use a different location".to_string(),
            ],
            Self::Config(_) => {
                vec!["Check the configuration file passed with --config".to_string()]
            },
            Self::AlreadyExists { kind, .. } if kind == DATABASE_KIND => {
                vec!["Pass --force to overwrite the existing data".to_string()]
            },
            Self::AlreadyExists { .. } => vec!["Choose a different name".to_string()],
            _ => vec![],
        }
    }

    /// Whether the user can fix the problem and try again
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::StorageUnavailable { .. } | Self::Io(_) | Self::SerializationError(_)
        )
    }

    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<serde_json::Error> for HelpdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for HelpdeskError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<csv::Error> for HelpdeskError {
    fn from(err: csv::Error) -> Self {
        Self::SerializationError(format!("CSV error: {err}"))
    }
}

impl From<dialoguer::Error> for HelpdeskError {
    fn from(err: dialoguer::Error) -> Self {
        Self::custom(format!("Prompt failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_is_fatal() {
        let err = HelpdeskError::storage("/tmp/helpdesk.json", "permission denied");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(err.suggestions().len(), 2);
    }

    #[test]
    fn test_not_found_is_recoverable() {
        let err = HelpdeskError::TicketNotFound {
            id: "TICKET-9999".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.user_message(), "Ticket not found: TICKET-9999");
    }

    #[test]
    fn test_config_error_detection() {
        let err = HelpdeskError::Config("bad key".to_string());
        assert!(err.is_config_error());
        assert!(!HelpdeskError::InvalidCredentials.is_config_error());
    }
}
