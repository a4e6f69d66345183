//! Remote API traits

use crate::Result;
use crate::types::{NewVariable, RemoteVariable, Workspace};

/// Variable operations on one workspace
///
/// Mutations are keyed by variable name; implementations resolve names to
/// remote identifiers themselves.
pub trait VariableApi {
    fn list_variables(&self) -> Result<Vec<RemoteVariable>>;

    fn create_variable(&self, variable: &NewVariable) -> Result<()>;

    fn delete_variable(&self, key: &str) -> Result<()>;

    fn update_variable(&self, key: &str, value: &str) -> Result<()>;
}

/// Workspace operations on one organization
pub trait WorkspaceApi {
    fn list_workspaces(&self) -> Result<Vec<Workspace>>;

    fn create_workspace(&self, name: &str) -> Result<Workspace>;

    /// Create a workspace linked to a VCS repository (`owner/repo`)
    fn create_workspace_with_vcs_link(&self, name: &str, repo_identifier: &str)
    -> Result<Workspace>;
}
