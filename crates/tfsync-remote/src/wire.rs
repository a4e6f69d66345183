//! JSON:API documents exchanged with the service

use serde::{Deserialize, Serialize};

use crate::error::ErrorDetail;
use crate::types::{RemoteVariable, Workspace};

#[derive(Debug, Deserialize)]
pub(crate) struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl<T> Document<T> {
    pub fn next_page(&self) -> Option<u32> {
        self.meta
            .as_ref()
            .and_then(|m| m.pagination.as_ref())
            .and_then(|p| p.next_page)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Pagination {
    #[serde(default)]
    pub next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Resource<A> {
    pub id: String,
    pub attributes: A,
}

/// Identifier of a resource returned by a create call
#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VarAttributes {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub category: Option<String>,
}

impl VarAttributes {
    pub fn is_terraform(&self) -> bool {
        self.category.as_deref().is_none_or(|c| c == "terraform")
    }
}

impl From<Resource<VarAttributes>> for RemoteVariable {
    fn from(resource: Resource<VarAttributes>) -> Self {
        Self {
            id: resource.id,
            key: resource.attributes.key,
            value: resource.attributes.value.unwrap_or_default(),
            sensitive: resource.attributes.sensitive,
            hcl: resource.attributes.hcl,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct WorkspaceAttributes {
    pub name: String,
    #[serde(default)]
    pub vcs_repo: Option<VcsRepo>,
}

impl From<Resource<WorkspaceAttributes>> for Workspace {
    fn from(resource: Resource<WorkspaceAttributes>) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
            vcs_repo: resource.attributes.vcs_repo.map(|r| r.identifier),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct VcsRepo {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}
