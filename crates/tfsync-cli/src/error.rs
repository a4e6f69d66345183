//! Error types for tfsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tfsync-core
    #[error(transparent)]
    Core(#[from] tfsync_core::Error),

    /// Error from tfsync-template
    #[error(transparent)]
    Template(#[from] tfsync_template::Error),

    /// Error from tfsync-remote
    #[error(transparent)]
    Remote(#[from] tfsync_remote::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON report serialization error
    #[error("Failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
