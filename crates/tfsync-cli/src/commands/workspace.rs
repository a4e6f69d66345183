//! checkWorkspace, addWorkspace and listWorkspaces

use colored::Colorize;
use serde_json::json;

use tfsync_core::{add_workspace, find_workspace};
use tfsync_remote::{Workspace, WorkspaceApi};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Succeeds only if the target workspace exists
pub fn run_check_workspace(ctx: &Context) -> Result<()> {
    let name = ctx.target_workspace()?;
    match find_workspace(ctx.client(), &name)? {
        Some(workspace) => {
            println!(
                "{} Workspace {} exists in {} ({})",
                "OK".green().bold(),
                workspace.name.yellow(),
                ctx.client().organization().cyan(),
                workspace.id
            );
            Ok(())
        }
        None => Err(CliError::user(format!(
            "Workspace {name} does not exist in {}",
            ctx.client().organization()
        ))),
    }
}

/// Create the target workspace, optionally linked to a VCS repository
pub fn run_add_workspace(ctx: &Context, git_repo: Option<&str>) -> Result<()> {
    let name = ctx.target_workspace()?;
    let workspace = add_workspace(ctx.client(), &name, git_repo)?;

    print!(
        "{} Created workspace {} ({})",
        "OK".green().bold(),
        workspace.name.yellow(),
        workspace.id
    );
    match &workspace.vcs_repo {
        Some(repo) => println!(" linked to {}", repo.cyan()),
        None => println!(),
    }
    Ok(())
}

/// List every workspace in the organization
pub fn run_list_workspaces(ctx: &Context, json: bool) -> Result<()> {
    let workspaces = ctx.client().list_workspaces()?;

    if json {
        let output = json!({
            "organization": ctx.client().organization(),
            "workspaces": workspaces,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_workspaces(ctx.client().organization(), &workspaces));
    }
    Ok(())
}

fn render_workspaces(organization: &str, workspaces: &[Workspace]) -> String {
    if workspaces.is_empty() {
        return format!("No workspaces in {}.\n", organization.cyan());
    }

    let mut out = format!("{}\n\n", organization.cyan().bold());
    for workspace in workspaces {
        out.push_str(&format!("  {}", workspace.name));
        if let Some(repo) = &workspace.vcs_repo {
            out.push_str(&format!(" {}", format!("({repo})").dimmed()));
        }
        out.push('\n');
    }
    out
}
