//! Command implementations for tfsync-cli

pub mod compare;
pub mod variables;
pub mod workspace;

pub use compare::run_compare;
pub use variables::run_batch;
pub use workspace::{run_add_workspace, run_check_workspace, run_list_workspaces};
