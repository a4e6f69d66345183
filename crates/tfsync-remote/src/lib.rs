//! Remote workspace API client for tfsync
//!
//! Two traits form the seam between the reconciliation core and the remote
//! service:
//!
//! - [`VariableApi`] reads and mutates the variables of one workspace
//! - [`WorkspaceApi`] lists and creates workspaces of one organization
//!
//! [`TfeClient`] implements both against the Terraform Enterprise / Atlas v2
//! JSON:API using a blocking HTTP client.

pub mod api;
pub mod client;
pub mod error;
pub mod types;
mod wire;

pub use api::{VariableApi, WorkspaceApi};
pub use client::{ClientConfig, DEFAULT_ADDRESS, TfeClient, WorkspaceVariables};
pub use error::{ApiError, Error, ErrorDetail, Result};
pub use types::{NewVariable, RemoteVariable, Workspace};
