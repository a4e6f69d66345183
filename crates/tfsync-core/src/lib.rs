//! Reconciliation and sync orchestration for tfsync
//!
//! This crate sits between the two Layer 0 crates and the CLI:
//!
//! ```text
//!                       tfsync-cli
//!                           |
//!                      tfsync-core
//!                           |
//!              +------------+------------+
//!              |                         |
//!       tfsync-template            tfsync-remote
//! ```
//!
//! - **config**: [`Settings`] built once per process from flags, environment and file
//! - **workspace**: resolving which remote workspace a command targets
//! - **reconcile**: classifying declared vs. remote variables
//! - **sync**: turning a [`Classification`] into remote create/delete/update calls

pub mod config;
pub mod error;
pub mod reconcile;
pub mod sync;
pub mod workspace;

pub use config::{CredentialOverrides, FileConfig, Settings, SettingsOverrides};
pub use error::{Error, Result};
pub use reconcile::{Classification, ValueChange, compare, reconcile, remote_index};
pub use sync::{
    BatchResult, ItemOutcome, ItemStatus, NoopObserver, PLACEHOLDER, SyncAction, SyncEngine,
    SyncObserver, SyncOptions, outgoing_variable,
};
pub use workspace::{add_workspace, find_workspace, resolve_workspace_name};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_workspace_identity_mentions_flag() {
        let display = Error::MissingWorkspaceIdentity.to_string();
        assert!(
            display.contains("--workspace"),
            "Error display should mention the flag, got: {}",
            display
        );
    }
}
