//! Remote resource types

use serde::Serialize;

/// A variable as currently stored in a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteVariable {
    /// Opaque remote identifier
    pub id: String,
    pub key: String,
    /// Sensitive values are write-only remotely and read back as `""`
    pub value: String,
    pub sensitive: bool,
    /// Whether the value is parsed as HCL remotely
    pub hcl: bool,
}

/// A remote workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    /// Opaque remote identifier
    pub id: String,
    pub name: String,
    /// VCS repository identifier (`owner/repo`) when linked
    pub vcs_repo: Option<String>,
}

/// A variable to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub hcl: bool,
    pub sensitive: bool,
}
