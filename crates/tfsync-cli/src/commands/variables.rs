//! addNew, removeMissing and updateValues
//!
//! All three load the template, classify it against the workspace with a
//! single listing call, then run one batch of remote mutations.

use colored::{ColoredString, Colorize};

use tfsync_core::{BatchResult, ItemStatus, SyncAction, SyncEngine, SyncOptions, compare};

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::progress::BatchProgress;

/// Run one sync batch against the target workspace
///
/// Every item is attempted. If any of them failed, the report lists them all
/// and an error is returned afterwards.
pub fn run_batch(ctx: &Context, action: SyncAction, dry_run: bool) -> Result<()> {
    let declarations = ctx.declarations()?;
    let name = ctx.workspace_name(&declarations)?;
    let remote = ctx.client().workspace(&name)?;
    let classification = compare(&declarations, &remote)?;

    let engine = SyncEngine::new(&remote, &ctx.settings.credentials)
        .with_options(SyncOptions { dry_run });
    let declared = declarations.variables();

    let batch = match action {
        SyncAction::Create => {
            let mut progress = BatchProgress::new(classification.added.len(), action);
            let batch = engine.apply_additions(&classification.added, declared, &mut progress);
            progress.finish();
            batch
        }
        SyncAction::Delete => {
            let mut progress = BatchProgress::new(classification.removed.len(), action);
            let batch = engine.apply_removals(&classification.removed, &mut progress);
            progress.finish();
            batch
        }
        SyncAction::Update => {
            let mut progress = BatchProgress::new(classification.modified.len(), action);
            let batch = engine.apply_updates(&classification.modified, declared, &mut progress);
            progress.finish();
            batch
        }
    };

    print!("{}", render_batch(&remote.workspace().name, &batch, dry_run));

    let failed = batch.failures().count();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} of {} variable(s) failed to {}",
            batch.outcomes.len(),
            batch.action
        )));
    }
    Ok(())
}

fn marker(action: SyncAction) -> ColoredString {
    match action {
        SyncAction::Create => "+".green(),
        SyncAction::Delete => "-".red(),
        SyncAction::Update => "~".yellow(),
    }
}

fn past_tense(action: SyncAction) -> &'static str {
    match action {
        SyncAction::Create => "created",
        SyncAction::Delete => "deleted",
        SyncAction::Update => "updated",
    }
}

/// Human-readable batch report
fn render_batch(workspace: &str, batch: &BatchResult, dry_run: bool) -> String {
    if batch.is_nothing_to_do() {
        return format!("{} Nothing to do for {}.\n", "OK".green().bold(), workspace.yellow());
    }

    let title = if dry_run { "Dry run" } else { "Sync" };
    let mut out = format!("{} {}\n\n", title.blue().bold(), workspace.yellow());

    for outcome in &batch.outcomes {
        let key = &outcome.key;
        let line = match &outcome.status {
            ItemStatus::Applied => format!("  {} {}", marker(batch.action), key),
            ItemStatus::Planned => format!(
                "  {} {} {}",
                marker(batch.action),
                key,
                format!("(would {})", batch.action).dimmed()
            ),
            ItemStatus::Skipped { reason } => {
                format!("  {} {} {}", "=".dimmed(), key, format!("({reason})").dimmed())
            }
            ItemStatus::Failed { detail } => {
                format!("  {} {}: {}", "!".red().bold(), key.red(), detail)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    let mut summary = Vec::new();
    if batch.applied_count() > 0 {
        summary.push(format!("{} {}", batch.applied_count(), past_tense(batch.action)));
    }
    if batch.planned_count() > 0 {
        summary.push(format!("{} planned", batch.planned_count()));
    }
    if batch.skipped_count() > 0 {
        summary.push(format!("{} skipped", batch.skipped_count()));
    }
    let failed = batch.failures().count();
    if failed > 0 {
        summary.push(format!("{failed} failed").red().to_string());
    }
    out.push_str(&format!("\n{}\n", summary.join(", ")));
    out
}
