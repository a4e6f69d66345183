//! tfsync CLI
//!
//! Reconciles the variables declared in a Terraform template with those
//! stored in a remote workspace.

mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod progress;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;
use tfsync_core::SyncAction;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }

    let Some(command) = cli.command.clone() else {
        println!("{} Terraform workspace variable sync", "tfsync".green().bold());
        println!();
        println!("Run {} for available commands.", "tfsync --help".cyan());
        return Ok(());
    };

    let ctx = Context::from_cli(&cli)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Compare { json } => commands::run_compare(ctx, json),
        Commands::AddNew { dry_run } => commands::run_batch(ctx, SyncAction::Create, dry_run),
        Commands::RemoveMissing { dry_run } => {
            commands::run_batch(ctx, SyncAction::Delete, dry_run)
        }
        Commands::UpdateValues { dry_run } => {
            commands::run_batch(ctx, SyncAction::Update, dry_run)
        }
        Commands::CheckWorkspace => commands::run_check_workspace(ctx),
        Commands::AddWorkspace { git_repo } => {
            commands::run_add_workspace(ctx, git_repo.as_deref())
        }
        Commands::ListWorkspaces { json } => commands::run_list_workspaces(ctx, json),
    }
}
