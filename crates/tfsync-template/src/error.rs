//! Error types for tfsync-template

use std::path::PathBuf;

/// Result type for template operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a template
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to evaluate default of variable {name} in {path}: {message}")]
    Evaluate {
        path: PathBuf,
        name: String,
        message: String,
    },

    #[error("Variable {name} has a {kind} default; only strings, numbers and maps are supported")]
    UnsupportedValue { name: String, kind: &'static str },

    #[error("Invalid {block} block in {path}: {message}")]
    InvalidBlock {
        path: PathBuf,
        block: String,
        message: String,
    },

    #[error("Variable {name} is declared more than once (again in {path})")]
    DuplicateVariable { name: String, path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
