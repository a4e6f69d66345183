//! Workspace resolution
//!
//! Every remote operation needs a workspace name. It comes from `--workspace`
//! when given, otherwise from the template's linkage block.

use tfsync_remote::{Workspace, WorkspaceApi};
use tfsync_template::Declarations;
use tracing::{debug, info};

use crate::{Error, Result};

/// Determine the target workspace name
///
/// An explicit, non-empty name always wins. Otherwise the second segment of
/// the linkage block's `organization/workspace` identifier is used.
///
/// # Errors
///
/// - [`Error::MissingWorkspaceIdentity`] if neither source is available
/// - [`Error::InvalidLinkage`] unless the linkage name has exactly two
///   segments with a non-empty workspace. Workspace names cannot contain `/`,
///   so `acme/a/b` is rejected rather than resolved to `a`.
pub fn resolve_workspace_name(
    explicit: Option<&str>,
    declarations: Option<&Declarations>,
) -> Result<String> {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        debug!(workspace = %name, "Using explicit workspace");
        return Ok(name.to_string());
    }

    let linkage = declarations
        .and_then(Declarations::linkage)
        .ok_or(Error::MissingWorkspaceIdentity)?;

    match linkage.name.split_once('/') {
        Some((_, workspace)) if !workspace.is_empty() && !workspace.contains('/') => {
            debug!(workspace = %workspace, linkage = %linkage.name, "Using linked workspace");
            Ok(workspace.to_string())
        }
        _ => Err(Error::InvalidLinkage {
            name: linkage.name.clone(),
        }),
    }
}

/// Find a workspace by exact name
pub fn find_workspace(api: &dyn WorkspaceApi, name: &str) -> Result<Option<Workspace>> {
    Ok(api.list_workspaces()?.into_iter().find(|w| w.name == name))
}

/// Create a workspace, linked to a VCS repository when `git_repo` is given
pub fn add_workspace(
    api: &dyn WorkspaceApi,
    name: &str,
    git_repo: Option<&str>,
) -> Result<Workspace> {
    let workspace = match git_repo {
        Some(repo) => api.create_workspace_with_vcs_link(name, repo)?,
        None => api.create_workspace(name)?,
    };
    info!(workspace = %workspace.name, vcs_repo = ?workspace.vcs_repo, "Workspace added");
    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn explicit_name_takes_precedence() {
        let decls = Declarations::new().with_linkage("acme/linked");
        let name = resolve_workspace_name(Some("explicit"), Some(&decls)).unwrap();
        assert_eq!(name, "explicit");
    }

    #[test]
    fn linkage_second_segment_is_used() {
        let decls = Declarations::new().with_linkage("acme/linked");
        let name = resolve_workspace_name(None, Some(&decls)).unwrap();
        assert_eq!(name, "linked");
    }

    #[test]
    fn empty_explicit_name_falls_back_to_linkage() {
        let decls = Declarations::new().with_linkage("acme/linked");
        let name = resolve_workspace_name(Some(""), Some(&decls)).unwrap();
        assert_eq!(name, "linked");
    }

    #[test]
    fn nothing_available_is_missing_identity() {
        let err = resolve_workspace_name(None, None).unwrap_err();
        assert!(matches!(err, Error::MissingWorkspaceIdentity));

        let unlinked = Declarations::new().with_variable("a", "1");
        let err = resolve_workspace_name(None, Some(&unlinked)).unwrap_err();
        assert!(matches!(err, Error::MissingWorkspaceIdentity));
    }

    #[rstest]
    #[case("no-slash")]
    #[case("acme/")]
    #[case("acme/a/b")]
    fn malformed_linkage_is_rejected(#[case] linkage: &str) {
        let decls = Declarations::new().with_linkage(linkage);
        let err = resolve_workspace_name(None, Some(&decls)).unwrap_err();
        assert!(matches!(err, Error::InvalidLinkage { ref name } if name == linkage));
    }
}
