//! Reconciliation of declared and remote variables
//!
//! [`reconcile`] is a pure function: it partitions the union of declared and
//! remote names into four disjoint sets. Names are compared exactly
//! (case-sensitive, no normalization). Values are compared by their string
//! form, so a declared `1` and a remote `"1"` are equal while `1.0` and `1`
//! are not.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tfsync_remote::{RemoteVariable, VariableApi};
use tfsync_template::{Declarations, VariableDeclaration};
use tracing::debug;

use crate::Result;

/// Both sides of a modified variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueChange {
    /// Rendered declared default
    pub declared: String,
    /// Current remote value
    pub remote: String,
}

/// Partition of `declared ∪ remote` names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Declared only
    pub added: BTreeSet<String>,
    /// Remote only
    pub removed: BTreeSet<String>,
    /// In both, with differing string values
    pub modified: BTreeMap<String, ValueChange>,
    /// In both, with identical string values
    pub unchanged: BTreeSet<String>,
}

impl Classification {
    /// True when there is nothing to add, remove or update
    pub fn is_in_sync(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of classified names
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len() + self.unchanged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every declared and remote name
pub fn reconcile(
    declared: &BTreeMap<String, VariableDeclaration>,
    remote: &BTreeMap<String, RemoteVariable>,
) -> Classification {
    let mut classification = Classification::default();

    for (name, declaration) in declared {
        match remote.get(name) {
            None => {
                classification.added.insert(name.clone());
            }
            Some(current) => {
                let rendered = declaration.default.render();
                if rendered == current.value {
                    classification.unchanged.insert(name.clone());
                } else {
                    classification.modified.insert(
                        name.clone(),
                        ValueChange {
                            declared: rendered,
                            remote: current.value.clone(),
                        },
                    );
                }
            }
        }
    }

    classification.removed = remote
        .keys()
        .filter(|name| !declared.contains_key(*name))
        .cloned()
        .collect();

    debug!(
        added = classification.added.len(),
        removed = classification.removed.len(),
        modified = classification.modified.len(),
        unchanged = classification.unchanged.len(),
        "Reconciled variables"
    );
    classification
}

/// Index remote variables by key
///
/// If the service ever returns the same key twice, the last entry wins.
pub fn remote_index(variables: Vec<RemoteVariable>) -> BTreeMap<String, RemoteVariable> {
    variables.into_iter().map(|v| (v.key.clone(), v)).collect()
}

/// List the workspace's variables once and classify them against `declarations`
pub fn compare(declarations: &Declarations, api: &dyn VariableApi) -> Result<Classification> {
    let remote = remote_index(api.list_variables()?);
    Ok(reconcile(declarations.variables(), &remote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn remote(pairs: &[(&str, &str)]) -> BTreeMap<String, RemoteVariable> {
        pairs
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    RemoteVariable {
                        id: format!("var-{k}"),
                        key: k.to_string(),
                        value: v.to_string(),
                        sensitive: false,
                        hcl: false,
                    },
                )
            })
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn names_are_case_sensitive() {
        let declared = Declarations::new().with_variable("Region", "x");
        let result = reconcile(declared.variables(), &remote(&[("region", "x")]));
        assert_eq!(result.added, set(&["Region"]));
        assert_eq!(result.removed, set(&["region"]));
    }

    #[test]
    fn numbers_compare_by_rendered_text() {
        let declared = Declarations::new()
            .with_variable("count", 1_i64)
            .with_variable("ratio", 2_i64);
        let result = reconcile(
            declared.variables(),
            &remote(&[("count", "1"), ("ratio", "2.0")]),
        );
        assert_eq!(result.unchanged, set(&["count"]));
        assert_eq!(
            result.modified.get("ratio"),
            Some(&ValueChange {
                declared: "2".to_string(),
                remote: "2.0".to_string(),
            })
        );
    }

    #[test]
    fn empty_remote_adds_everything() {
        let declared = Declarations::new()
            .with_variable("a", "1")
            .with_variable("b", "");
        let result = reconcile(declared.variables(), &BTreeMap::new());
        assert_eq!(result.added, set(&["a", "b"]));
        assert!(result.removed.is_empty());
        assert!(!result.is_in_sync());
    }

    #[test]
    fn remote_index_keys_by_name() {
        let index = remote_index(remote(&[("a", "1"), ("b", "2")]).into_values().collect());
        assert_eq!(index.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
