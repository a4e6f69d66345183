//! Per-invocation command context
//!
//! Settings are resolved before any command runs, so missing credentials
//! fail the process before the template is read or the remote is contacted.

use std::path::PathBuf;

use tfsync_core::{FileConfig, Settings, SettingsOverrides, resolve_workspace_name};
use tfsync_remote::TfeClient;
use tfsync_template::Declarations;
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;

/// Everything a command needs from the command line and environment
pub struct Context {
    pub settings: Settings,
    template: PathBuf,
    workspace: Option<String>,
    client: TfeClient,
}

impl Context {
    /// Resolve settings from flags, the process environment and the config file
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = FileConfig::discover(cli.config.as_deref())?;
        let overrides = SettingsOverrides {
            token: cli.tf_key.clone(),
            organization: cli.organization.clone(),
            address: cli.address.clone(),
        };
        let settings = Settings::resolve(&overrides, &file, |name| std::env::var(name).ok())?;
        debug!(?settings, "Resolved settings");

        let client = TfeClient::new(settings.client_config())?;
        Ok(Self {
            settings,
            template: cli.tf_template.clone(),
            workspace: cli.workspace.clone(),
            client,
        })
    }

    pub fn client(&self) -> &TfeClient {
        &self.client
    }

    /// Load the template's variable declarations
    pub fn declarations(&self) -> Result<Declarations> {
        debug!(path = %self.template.display(), "Loading template");
        Ok(tfsync_template::load(&self.template)?)
    }

    /// Resolve the workspace name using already loaded declarations
    pub fn workspace_name(&self, declarations: &Declarations) -> Result<String> {
        Ok(resolve_workspace_name(
            self.workspace.as_deref(),
            Some(declarations),
        )?)
    }

    /// Resolve the workspace name, reading the template only without `--workspace`
    pub fn target_workspace(&self) -> Result<String> {
        match self.workspace.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => Ok(resolve_workspace_name(Some(name), None)?),
            None => self.workspace_name(&self.declarations()?),
        }
    }
}
