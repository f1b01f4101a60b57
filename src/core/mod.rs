use std::path::Path;

use thiserror::Error;

use crate::services::session::ExecutionContext;

/// Error types for the media session adapter.
///
/// Covers player attachment, command delivery, D-Bus export and
/// configuration loading.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A player bound to another execution context was attached
    #[error("player runs on {actual} but the connector is fixed to {expected}")]
    ContextMismatch {
        /// Context the connector was created on
        expected: ExecutionContext,
        /// Context of the rejected player
        actual: ExecutionContext,
    },

    /// A command was dispatched before any handler was installed
    #[error("no command handler installed on the session")]
    NoCommandHandler,

    /// The connector run loop is gone
    #[error("session connector is no longer running")]
    ConnectorClosed,

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    Dbus(#[from] zbus::Error),

    /// Failed to bring up a session backend
    #[error("failed to initialize media session: {0}")]
    InitializationFailed(String),

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for media session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        SessionError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }
}
