//! Batch outcome types

use std::fmt;

use serde::Serialize;

/// Kind of remote mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Delete,
    Update,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Delete => write!(f, "delete"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// What happened to one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemStatus {
    /// The remote call succeeded
    Applied,
    /// Dry run: the call would have been made
    Planned,
    /// No call was made
    Skipped { reason: String },
    /// The remote call (or its preparation) failed
    Failed { detail: String },
}

/// Outcome for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub key: String,
    #[serde(flatten)]
    pub status: ItemStatus,
}

/// Per-item outcomes of one create/delete/update batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub action: SyncAction,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchResult {
    /// An empty batch: there was nothing to do
    pub fn nothing_to_do(action: SyncAction) -> Self {
        Self {
            action,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, status: ItemStatus) {
        self.outcomes.push(ItemOutcome {
            key: key.into(),
            status,
        });
    }

    /// True when the input set was empty and no item was processed
    pub fn is_nothing_to_do(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn status(&self, key: &str) -> Option<&ItemStatus> {
        self.outcomes
            .iter()
            .find(|o| o.key == key)
            .map(|o| &o.status)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn applied_count(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Applied))
    }

    pub fn planned_count(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Planned))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, ItemStatus::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
