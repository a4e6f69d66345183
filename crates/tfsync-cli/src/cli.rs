//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tfsync - Keep Terraform workspace variables in line with a template
#[derive(Parser, Debug)]
#[command(name = "tfsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Template file or directory holding the variable declarations
    #[arg(
        long = "tf_template",
        global = true,
        default_value = "main.tf",
        value_name = "PATH"
    )]
    pub tf_template: PathBuf,

    /// Target workspace (defaults to the template's atlas block)
    #[arg(long, global = true)]
    pub workspace: Option<String>,

    /// API access token (falls back to ATLAS_TOKEN)
    #[arg(long = "tf_key", global = true, value_name = "TOKEN")]
    pub tf_key: Option<String>,

    /// Organization owning the workspaces (falls back to ATLAS_ORGANIZATION)
    #[arg(long, global = true)]
    pub organization: Option<String>,

    /// Service address (falls back to ATLAS_ADDRESS)
    #[arg(long, global = true, value_name = "URL")]
    pub address: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, env = "TFSYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show how the workspace differs from the template
    Compare {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Create variables declared in the template but missing remotely
    ///
    /// Empty defaults are created as REPLACE_IN_ATLAS. aws_access_key and
    /// aws_secret_key take their values from TF_VAR_aws_access_key /
    /// TF_VAR_aws_secret_key or AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY
    /// when set, and are stored as sensitive.
    #[command(name = "addNew", alias = "add-new")]
    AddNew {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete remote variables the template no longer declares
    #[command(name = "removeMissing", alias = "remove-missing")]
    RemoveMissing {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Push changed template defaults to the workspace
    ///
    /// Mapping and empty defaults are never pushed.
    #[command(name = "updateValues", alias = "update-values")]
    UpdateValues {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the workspace exists
    #[command(name = "checkWorkspace", alias = "check-workspace")]
    CheckWorkspace,

    /// Create the workspace
    ///
    /// Examples:
    ///   tfsync addWorkspace --workspace network
    ///   tfsync addWorkspace --workspace network --git_repo acme/network-infra
    #[command(name = "addWorkspace", alias = "add-workspace")]
    AddWorkspace {
        /// VCS repository (owner/repo) to link the workspace to
        #[arg(long = "git_repo", value_name = "OWNER/REPO")]
        git_repo: Option<String>,
    },

    /// List the organization's workspaces
    #[command(name = "listWorkspaces", alias = "list-workspaces")]
    ListWorkspaces {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
