//! SyncEngine implementation

use std::collections::{BTreeMap, BTreeSet};

use tfsync_remote::{NewVariable, VariableApi};
use tfsync_template::{DeclaredValue, VariableDeclaration};
use tracing::{debug, warn};

use super::batch::{BatchResult, ItemStatus, SyncAction};
use super::observer::SyncObserver;
use crate::config::CredentialOverrides;
use crate::reconcile::ValueChange;

/// Value written for declared variables with an empty default
///
/// Marks the variable for manual follow-up by an operator.
pub const PLACEHOLDER: &str = "REPLACE_IN_ATLAS";

/// Options for sync operations
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, record every item as planned without calling the remote.
    pub dry_run: bool,
}

/// Compute the variable to create for a declared name
///
/// - mappings pass through as HCL
/// - empty strings become [`PLACEHOLDER`]
/// - anything else is sent verbatim
///
/// A credential override for a reserved name replaces the computed value and
/// marks the variable sensitive.
pub fn outgoing_variable(
    name: &str,
    default: &DeclaredValue,
    credentials: &CredentialOverrides,
) -> NewVariable {
    let (value, hcl) = match default {
        DeclaredValue::Mapping(_) => (default.render(), true),
        _ if default.is_empty() => (PLACEHOLDER.to_string(), false),
        _ => (default.render(), false),
    };

    match credentials.value_for(name) {
        Some(secret) => NewVariable {
            key: name.to_string(),
            value: secret.to_string(),
            hcl: false,
            sensitive: true,
        },
        None => NewVariable {
            key: name.to_string(),
            value,
            hcl,
            sensitive: false,
        },
    }
}

/// Applies classification sets to one workspace
///
/// Each method processes its keys in order, one remote call per key, and
/// keeps going after a failure.
pub struct SyncEngine<'a> {
    api: &'a dyn VariableApi,
    credentials: &'a CredentialOverrides,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(api: &'a dyn VariableApi, credentials: &'a CredentialOverrides) -> Self {
        Self {
            api,
            credentials,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Create every variable in `added`
    pub fn apply_additions(
        &self,
        added: &BTreeSet<String>,
        declared: &BTreeMap<String, VariableDeclaration>,
        observer: &mut dyn SyncObserver,
    ) -> BatchResult {
        let mut batch = BatchResult::nothing_to_do(SyncAction::Create);

        for name in added {
            let Some(declaration) = declared.get(name) else {
                observer.on_item(SyncAction::Create, name);
                batch.push(name, undeclared(name));
                continue;
            };
            let variable = outgoing_variable(name, &declaration.default, self.credentials);
            observer.on_item(SyncAction::Create, name);

            let status = self.run(SyncAction::Create, name, || {
                self.api.create_variable(&variable)
            });
            batch.push(name, status);
        }

        batch
    }

    /// Delete every variable in `removed`
    ///
    /// Deletion is keyed by name; the remote adapter resolves identifiers.
    pub fn apply_removals(
        &self,
        removed: &BTreeSet<String>,
        observer: &mut dyn SyncObserver,
    ) -> BatchResult {
        let mut batch = BatchResult::nothing_to_do(SyncAction::Delete);
        if removed.is_empty() {
            debug!("No variables to remove");
            return batch;
        }

        for name in removed {
            observer.on_item(SyncAction::Delete, name);
            let status = self.run(SyncAction::Delete, name, || self.api.delete_variable(name));
            batch.push(name, status);
        }

        batch
    }

    /// Push declared values for every modified variable
    ///
    /// Mappings and empty values are skipped so an existing remote value is
    /// never overwritten with one that cannot be rendered.
    pub fn apply_updates(
        &self,
        modified: &BTreeMap<String, ValueChange>,
        declared: &BTreeMap<String, VariableDeclaration>,
        observer: &mut dyn SyncObserver,
    ) -> BatchResult {
        let mut batch = BatchResult::nothing_to_do(SyncAction::Update);
        if modified.is_empty() {
            debug!("No variables to update");
            return batch;
        }

        for name in modified.keys() {
            let Some(declaration) = declared.get(name) else {
                observer.on_item(SyncAction::Update, name);
                batch.push(name, undeclared(name));
                continue;
            };
            let default = &declaration.default;
            observer.on_item(SyncAction::Update, name);

            if !default.is_update_eligible() {
                let reason = if default.is_mapping() {
                    "mapping values are never updated"
                } else {
                    "empty values are never updated"
                };
                debug!(key = %name, reason, "Skipping update");
                batch.push(
                    name,
                    ItemStatus::Skipped {
                        reason: reason.to_string(),
                    },
                );
                continue;
            }

            let value = default.render();
            let status = self.run(SyncAction::Update, name, || {
                self.api.update_variable(name, &value)
            });
            batch.push(name, status);
        }

        batch
    }

    fn run(
        &self,
        action: SyncAction,
        key: &str,
        call: impl FnOnce() -> tfsync_remote::Result<()>,
    ) -> ItemStatus {
        if self.options.dry_run {
            debug!(%action, key, "[dry-run] Would call remote");
            return ItemStatus::Planned;
        }
        match call() {
            Ok(()) => ItemStatus::Applied,
            Err(e) => {
                warn!(%action, key, error = %e, "Remote call failed");
                ItemStatus::Failed {
                    detail: e.to_string(),
                }
            }
        }
    }
}

fn undeclared(name: &str) -> ItemStatus {
    warn!(key = %name, "Key has no declaration");
    ItemStatus::Failed {
        detail: format!("{name} is not declared in the template"),
    }
}
