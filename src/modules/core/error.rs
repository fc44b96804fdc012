//! Error types for Moorage

use thiserror::Error;

/// Main error type for Moorage operations
#[derive(Error, Debug)]
pub enum MoorageError {
    /// Configuration file reading or parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client options rejected before the driver was involved
    #[error("Invalid client options: {0}")]
    InvalidOptions(String),

    /// Connection string rejected by the driver
    #[error("Connection string error: {0}")]
    Uri(String),

    /// Driver failed to build a client
    #[error("Client construction failed: {0}")]
    Construction(String),

    /// Ping failed or did not finish within the timeout
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// Named connection not registered
    #[error("Connection not found: {0}")]
    ConnectorNotFound(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MoorageError {
    /// Returns true if the error comes from configuration rather than the network
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MoorageError::Config(_)
                | MoorageError::Validation(_)
                | MoorageError::InvalidOptions(_)
                | MoorageError::Uri(_)
                | MoorageError::Construction(_)
                | MoorageError::EnvVarNotFound(_)
                | MoorageError::ConnectorNotFound(_)
        )
    }

    /// Returns true if the server could not be reached
    pub fn is_connectivity_error(&self) -> bool {
        matches!(self, MoorageError::Connectivity(_))
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        if self.is_connectivity_error() {
            3
        } else if self.is_configuration_error() {
            2
        } else {
            1
        }
    }

    /// Sanitize the error message to avoid leaking connection strings
    pub fn sanitized_message(&self) -> String {
        match self {
            // Driver messages may echo the URI, credentials included
            MoorageError::Uri(_) => "Invalid connection string".to_string(),
            MoorageError::Construction(_) => "Failed to create database client".to_string(),
            MoorageError::Connectivity(_) => "Database unreachable".to_string(),

            MoorageError::Internal(_) => "Internal error".to_string(),

            _ => self.to_string(),
        }
    }
}

/// Result type alias using MoorageError
pub type Result<T> = std::result::Result<T, MoorageError>;
