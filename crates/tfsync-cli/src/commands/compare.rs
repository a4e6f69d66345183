//! Compare command implementation
//!
//! Shows what addNew, removeMissing and updateValues would change.

use colored::Colorize;
use serde_json::json;

use tfsync_core::{Classification, compare};

use crate::context::Context;
use crate::error::Result;

/// Run the compare command
pub fn run_compare(ctx: &Context, json: bool) -> Result<()> {
    let declarations = ctx.declarations()?;
    let name = ctx.workspace_name(&declarations)?;
    let remote = ctx.client().workspace(&name)?;
    let classification = compare(&declarations, &remote)?;

    if json {
        let output = json!({
            "workspace": name,
            "in_sync": classification.is_in_sync(),
            "added": classification.added,
            "removed": classification.removed,
            "modified": classification.modified,
            "unchanged": classification.unchanged,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_classification(&name, &classification));
    }

    Ok(())
}

/// Human-readable diff-style report
fn render_classification(workspace: &str, classification: &Classification) -> String {
    let mut out = String::new();

    if classification.is_in_sync() {
        out.push_str(&format!(
            "{} {} is in sync ({} unchanged).\n",
            "OK".green().bold(),
            workspace.yellow(),
            classification.unchanged.len()
        ));
        return out;
    }

    out.push_str(&format!("{} {}\n\n", "Compare".blue().bold(), workspace.yellow()));

    for key in &classification.added {
        out.push_str(&format!("  {} {}\n", "+".green(), key.green()));
    }
    for key in &classification.removed {
        out.push_str(&format!("  {} {}\n", "-".red(), key.red()));
    }
    for (key, change) in &classification.modified {
        out.push_str(&format!(
            "  {} {}: {:?} -> {:?}\n",
            "~".yellow(),
            key.yellow(),
            change.remote,
            change.declared
        ));
    }

    out.push_str(&format!(
        "\n{} to add, {} to remove, {} modified, {} unchanged\n",
        classification.added.len(),
        classification.removed.len(),
        classification.modified.len(),
        classification.unchanged.len()
    ));
    out
}
