//! In-memory remote for orchestration tests.
//!
//! [`RecordingRemote`] implements both remote traits over plain collections,
//! applies mutations to its own state, and records every call so tests can
//! assert the exact sequence the code under test issued.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use tfsync_remote::{
    ApiError, Error, ErrorDetail, NewVariable, RemoteVariable, Result, VariableApi, Workspace,
    WorkspaceApi,
};

/// A call received by [`RecordingRemote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListVariables,
    Create(NewVariable),
    Delete(String),
    Update { key: String, value: String },
    ListWorkspaces,
    CreateWorkspace { name: String, vcs_repo: Option<String> },
}

impl Call {
    /// True for calls that would change remote state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::ListVariables | Self::ListWorkspaces)
    }
}

/// Recording, in-memory implementation of [`VariableApi`] and [`WorkspaceApi`]
#[derive(Debug, Default)]
pub struct RecordingRemote {
    variables: RefCell<BTreeMap<String, RemoteVariable>>,
    workspaces: RefCell<Vec<Workspace>>,
    calls: RefCell<Vec<Call>>,
    failing: BTreeSet<String>,
}

impl RecordingRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a non-sensitive variable
    pub fn with_variable(self, key: &str, value: &str) -> Self {
        self.insert(key, value, false);
        self
    }

    /// Seed a sensitive variable; its value reads back empty
    pub fn with_sensitive_variable(self, key: &str) -> Self {
        self.insert(key, "", true);
        self
    }

    pub fn with_workspace(self, name: &str) -> Self {
        let id = format!("ws-{}", self.workspaces.borrow().len() + 1);
        self.workspaces.borrow_mut().push(Workspace {
            id,
            name: name.to_string(),
            vcs_repo: None,
        });
        self
    }

    /// Make every mutation of `key` fail with an API error
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that would have changed remote state
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    /// Current state of one variable
    pub fn variable(&self, key: &str) -> Option<RemoteVariable> {
        self.variables.borrow().get(key).cloned()
    }

    pub fn workspaces(&self) -> Vec<Workspace> {
        self.workspaces.borrow().clone()
    }

    fn insert(&self, key: &str, value: &str, sensitive: bool) {
        let mut variables = self.variables.borrow_mut();
        let id = format!("var-{}", variables.len() + 1);
        variables.insert(
            key.to_string(),
            RemoteVariable {
                id,
                key: key.to_string(),
                value: value.to_string(),
                sensitive,
                hcl: false,
            },
        );
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check_failure(&self, key: &str) -> Result<()> {
        if self.failing.contains(key) {
            return Err(ApiError::new(422, vec![ErrorDetail::new(format!("{key} was rejected"))]).into());
        }
        Ok(())
    }
}

impl VariableApi for RecordingRemote {
    fn list_variables(&self) -> Result<Vec<RemoteVariable>> {
        self.record(Call::ListVariables);
        Ok(self.variables.borrow().values().cloned().collect())
    }

    fn create_variable(&self, variable: &NewVariable) -> Result<()> {
        self.record(Call::Create(variable.clone()));
        self.check_failure(&variable.key)?;
        if self.variables.borrow().contains_key(&variable.key) {
            return Err(ApiError::new(
                422,
                vec![ErrorDetail::new("Key has already been taken")],
            )
            .into());
        }
        let stored = if variable.sensitive { "" } else { variable.value.as_str() };
        self.insert(&variable.key, stored, variable.sensitive);
        if let Some(v) = self.variables.borrow_mut().get_mut(&variable.key) {
            v.hcl = variable.hcl;
        }
        Ok(())
    }

    fn delete_variable(&self, key: &str) -> Result<()> {
        self.record(Call::Delete(key.to_string()));
        self.check_failure(key)?;
        self.variables
            .borrow_mut()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::VariableNotFound {
                key: key.to_string(),
            })
    }

    fn update_variable(&self, key: &str, value: &str) -> Result<()> {
        self.record(Call::Update {
            key: key.to_string(),
            value: value.to_string(),
        });
        self.check_failure(key)?;
        match self.variables.borrow_mut().get_mut(key) {
            Some(variable) => {
                variable.value = value.to_string();
                Ok(())
            }
            None => Err(Error::VariableNotFound {
                key: key.to_string(),
            }),
        }
    }
}

impl WorkspaceApi for RecordingRemote {
    fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.record(Call::ListWorkspaces);
        Ok(self.workspaces())
    }

    fn create_workspace(&self, name: &str) -> Result<Workspace> {
        self.record(Call::CreateWorkspace {
            name: name.to_string(),
            vcs_repo: None,
        });
        self.check_failure(name)?;
        let workspace = Workspace {
            id: format!("ws-{}", self.workspaces.borrow().len() + 1),
            name: name.to_string(),
            vcs_repo: None,
        };
        self.workspaces.borrow_mut().push(workspace.clone());
        Ok(workspace)
    }

    fn create_workspace_with_vcs_link(
        &self,
        name: &str,
        repo_identifier: &str,
    ) -> Result<Workspace> {
        self.record(Call::CreateWorkspace {
            name: name.to_string(),
            vcs_repo: Some(repo_identifier.to_string()),
        });
        self.check_failure(name)?;
        let workspace = Workspace {
            id: format!("ws-{}", self.workspaces.borrow().len() + 1),
            name: name.to_string(),
            vcs_repo: Some(repo_identifier.to_string()),
        };
        self.workspaces.borrow_mut().push(workspace.clone());
        Ok(workspace)
    }
}
