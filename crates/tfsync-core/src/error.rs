//! Error types for tfsync-core

use std::path::PathBuf;

/// Result type for tfsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tfsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither an explicit workspace nor a linkage block was available
    #[error(
        "No workspace given: pass --workspace or add an atlas block with name = \"organization/workspace\" to the template"
    )]
    MissingWorkspaceIdentity,

    /// The linkage block does not read `organization/workspace`
    #[error("Invalid workspace linkage {name:?}: expected \"organization/workspace\"")]
    InvalidLinkage { name: String },

    /// A required credential is absent from every configuration source
    #[error("Missing {what}: pass {flag} or set {env}")]
    MissingCredentials {
        what: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    /// Configuration file could not be read
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected shape
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Template error from tfsync-template
    #[error(transparent)]
    Template(#[from] tfsync_template::Error),

    /// Remote API error from tfsync-remote
    #[error(transparent)]
    Remote(#[from] tfsync_remote::Error),
}
