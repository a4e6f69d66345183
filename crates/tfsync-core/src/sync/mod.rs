//! Sync orchestration
//!
//! Turns the sets of a [`Classification`](crate::Classification) into remote
//! mutations:
//!
//! - **additions**: create declared-only variables, with placeholder and
//!   credential-injection rules
//! - **removals**: delete remote-only variables
//! - **updates**: push new values for modified variables, scalars only
//!
//! Every item is attempted independently; failures are collected in the
//! returned [`BatchResult`] instead of aborting the loop.

mod batch;
mod engine;
mod observer;

pub use batch::{BatchResult, ItemOutcome, ItemStatus, SyncAction};
pub use engine::{PLACEHOLDER, SyncEngine, SyncOptions, outgoing_variable};
pub use observer::{NoopObserver, SyncObserver};
