//! Error types for tfsync-remote

use serde::Deserialize;

/// Result type for remote API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the remote service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with an error payload
    #[error("{0}")]
    Api(ApiError),

    /// The request never produced a usable response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not match the expected document shape
    #[error("Unexpected response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Workspace not found: {name}")]
    WorkspaceNotFound { name: String },

    #[error("Variable not found: {key}")]
    VariableNotFound { key: String },
}

/// One entry of a JSON:API `errors` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::default()
        }
    }
}

/// An error payload returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(status: u16, errors: Vec<ErrorDetail>) -> Self {
        Self { status, errors }
    }

    /// The text surfaced to users: the first entry's detail
    ///
    /// Falls back to the first title, then to the status code.
    pub fn message(&self) -> String {
        let first = self.errors.first();
        first
            .and_then(|e| e.detail.clone())
            .or_else(|| first.and_then(|e| e.title.clone()))
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}
