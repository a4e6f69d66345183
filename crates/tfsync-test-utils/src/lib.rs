//! Test fixtures shared by the tfsync crates.
//!
//! Only ever used as a dev-dependency.
//!
//! # Modules
//!
//! - [`remote`]: [`RecordingRemote`](remote::RecordingRemote), an in-memory remote that records calls
//! - [`template`]: temporary template files and the checked-in fixture templates

pub mod remote;
pub mod template;
