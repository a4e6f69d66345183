//! Blocking HTTP client for the v2 JSON:API
//!
//! One [`TfeClient`] is bound to an organization; [`TfeClient::workspace`]
//! returns a [`WorkspaceVariables`] handle bound to one workspace.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::api::{VariableApi, WorkspaceApi};
use crate::error::{ApiError, Error, Result};
use crate::types::{NewVariable, RemoteVariable, Workspace};
use crate::wire::{Created, Document, ErrorDocument, Resource, VarAttributes, VcsRepo, WorkspaceAttributes};

/// Address used when none is configured
pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";

const API_PREFIX: &str = "/api/v2";
const JSON_API: &str = "application/vnd.api+json";
const PAGE_SIZE: u32 = 100;
const TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`TfeClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://app.terraform.io`
    pub address: String,
    pub token: String,
    pub organization: String,
    /// OAuth client token used when linking workspaces to a VCS repository
    pub oauth_token_id: Option<String>,
}

/// Organization-scoped API client
pub struct TfeClient {
    http: Client,
    base: String,
    token: String,
    organization: String,
    oauth_token_id: Option<String>,
}

impl TfeClient {
    /// Build a client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("tfsync/", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: format!("{}{}", config.address.trim_end_matches('/'), API_PREFIX),
            token: config.token,
            organization: config.organization,
            oauth_token_id: config.oauth_token_id,
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Look up a workspace by name and return a handle on its variables
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkspaceNotFound`] if the organization has no such
    /// workspace.
    pub fn workspace(&self, name: &str) -> Result<WorkspaceVariables<'_>> {
        let url = self.url(&format!(
            "/organizations/{}/workspaces/{}",
            self.organization, name
        ));
        let response = match self.send(self.http.get(&url)) {
            Ok(response) => response,
            Err(Error::Api(e)) if e.status == 404 => {
                return Err(Error::WorkspaceNotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(e),
        };
        let document: Document<Resource<WorkspaceAttributes>> = read_json(response, &url)?;
        let workspace = Workspace::from(document.data);
        debug!(workspace = %workspace.name, id = %workspace.id, "Resolved workspace");
        Ok(WorkspaceVariables {
            client: self,
            workspace,
            ids: RefCell::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, JSON_API)
            .send()?;
        debug!(status = %response.status(), url = %response.url(), "Remote call");
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(api_error(response))
        }
    }

    /// Fetch every page of a paginated collection
    fn get_all<A: DeserializeOwned>(&self, path: &str) -> Result<Vec<Resource<A>>> {
        let url = self.url(path);
        let mut page = 1;
        let mut items = Vec::new();
        loop {
            let request = self.http.get(&url).query(&[
                ("page[number]", page.to_string()),
                ("page[size]", PAGE_SIZE.to_string()),
            ]);
            let document: Document<Vec<Resource<A>>> = read_json(self.send(request)?, &url)?;
            let next = document.next_page();
            items.extend(document.data);
            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }
        Ok(items)
    }

    fn post_workspace(&self, name: &str, vcs_repo: Option<VcsRepo>) -> Result<Workspace> {
        let url = self.url(&format!("/organizations/{}/workspaces", self.organization));
        let mut attributes = json!({ "name": name });
        if let Some(repo) = vcs_repo {
            attributes["vcs-repo"] = json!(repo);
        }
        let body = json!({ "data": { "type": "workspaces", "attributes": attributes } });
        let response = self.send(self.http.post(&url).json(&body))?;
        let document: Document<Resource<WorkspaceAttributes>> = read_json(response, &url)?;
        info!(workspace = %name, "Created workspace");
        Ok(document.data.into())
    }
}

impl WorkspaceApi for TfeClient {
    fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let path = format!("/organizations/{}/workspaces", self.organization);
        let resources = self.get_all::<WorkspaceAttributes>(&path)?;
        Ok(resources.into_iter().map(Workspace::from).collect())
    }

    fn create_workspace(&self, name: &str) -> Result<Workspace> {
        self.post_workspace(name, None)
    }

    fn create_workspace_with_vcs_link(
        &self,
        name: &str,
        repo_identifier: &str,
    ) -> Result<Workspace> {
        let repo = VcsRepo {
            identifier: repo_identifier.to_string(),
            oauth_token_id: self.oauth_token_id.clone(),
        };
        self.post_workspace(name, Some(repo))
    }
}

/// Variable operations on one resolved workspace
///
/// Delete and update address variables by id. Ids come from the most recent
/// listing and are kept current across creates and deletes made through this
/// handle, so a batch lists the workspace at most once.
pub struct WorkspaceVariables<'a> {
    client: &'a TfeClient,
    workspace: Workspace,
    ids: RefCell<Option<BTreeMap<String, String>>>,
}

impl WorkspaceVariables<'_> {
    /// The workspace as the server reported it
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn vars_path(&self) -> String {
        format!("/workspaces/{}/vars", self.workspace.id)
    }

    /// Resolve a variable name to its remote identifier
    ///
    /// Lists the workspace only when no listing is cached.
    fn variable_id(&self, key: &str) -> Result<String> {
        if self.ids.borrow().is_none() {
            self.list_variables()?;
        }
        self.ids
            .borrow()
            .as_ref()
            .and_then(|ids| ids.get(key).cloned())
            .ok_or_else(|| Error::VariableNotFound {
                key: key.to_string(),
            })
    }
}

impl VariableApi for WorkspaceVariables<'_> {
    fn list_variables(&self) -> Result<Vec<RemoteVariable>> {
        let resources = self.client.get_all::<VarAttributes>(&self.vars_path())?;
        let variables: Vec<RemoteVariable> = resources
            .into_iter()
            .filter(|r| r.attributes.is_terraform())
            .map(RemoteVariable::from)
            .collect();
        let ids = variables
            .iter()
            .map(|v| (v.key.clone(), v.id.clone()))
            .collect();
        *self.ids.borrow_mut() = Some(ids);
        Ok(variables)
    }

    fn create_variable(&self, variable: &NewVariable) -> Result<()> {
        let url = self.client.url(&self.vars_path());
        let body = json!({
            "data": {
                "type": "vars",
                "attributes": {
                    "key": variable.key,
                    "value": variable.value,
                    "category": "terraform",
                    "hcl": variable.hcl,
                    "sensitive": variable.sensitive,
                }
            }
        });
        let response = self.client.send(self.client.http.post(&url).json(&body))?;
        info!(workspace = %self.workspace.name, key = %variable.key, "Created variable");

        // Without the new id the cache can no longer be trusted.
        let created = read_json::<Document<Created>>(response, &url).ok();
        let mut ids = self.ids.borrow_mut();
        match created {
            Some(document) => {
                if let Some(ids) = ids.as_mut() {
                    ids.insert(variable.key.clone(), document.data.id);
                }
            }
            None => *ids = None,
        }
        Ok(())
    }

    fn delete_variable(&self, key: &str) -> Result<()> {
        let id = self.variable_id(key)?;
        let url = self.client.url(&format!("{}/{}", self.vars_path(), id));
        self.client.send(self.client.http.delete(&url))?;
        if let Some(ids) = self.ids.borrow_mut().as_mut() {
            ids.remove(key);
        }
        info!(workspace = %self.workspace.name, key = %key, "Deleted variable");
        Ok(())
    }

    fn update_variable(&self, key: &str, value: &str) -> Result<()> {
        let id = self.variable_id(key)?;
        let url = self.client.url(&format!("{}/{}", self.vars_path(), id));
        let body = json!({
            "data": {
                "id": id,
                "type": "vars",
                "attributes": { "value": value }
            }
        });
        self.client.send(self.client.http.patch(&url).json(&body))?;
        info!(workspace = %self.workspace.name, key = %key, "Updated variable");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|e| Error::InvalidResponse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn api_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let errors = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorDocument>(&body).ok())
        .map(|doc| doc.errors)
        .unwrap_or_default();
    ApiError::new(status, errors).into()
}
