//! label command - Read or write branch labels directly

use super::{open_workspace, parse_branch, parse_label};
use crate::core::store::LabelStore;
use crate::engine::Context;
use anyhow::{Context as _, Result};

/// Print the short label of a branch. Prints nothing if unlabeled.
pub fn get(ctx: &Context, branch: &str) -> Result<()> {
    let branch = parse_branch(branch)?;
    let ws = open_workspace(ctx)?;

    let label = ws
        .store
        .get_label(&branch)
        .context("Failed to read labels")?;

    match label {
        Some(label) => println!("{}", label.short()),
        None => {
            if !ctx.quiet {
                eprintln!("'{}' has no label", branch);
            }
        }
    }

    Ok(())
}

/// Set a branch's label without transition or gate checks.
pub fn set(ctx: &Context, branch: &str, label: &str) -> Result<()> {
    let branch = parse_branch(branch)?;
    let label = parse_label(label)?;
    let mut ws = open_workspace(ctx)?;

    let previous = ws
        .store
        .get_label(&branch)
        .context("Failed to read labels")?;
    ws.store
        .set_label(&branch, label)
        .with_context(|| format!("Failed to label '{}'", branch))?;

    if !ctx.quiet {
        match previous {
            Some(prev) => println!("{}: {} -> {}", branch, prev.short(), label.short()),
            None => println!("{}: {}", branch, label.short()),
        }
    }

    Ok(())
}

/// List every labeled branch.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let ws = open_workspace(ctx)?;
    let labels = ws.store.all_labels().context("Failed to read labels")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&labels)?);
        return Ok(());
    }

    if labels.is_empty() {
        if !ctx.quiet {
            eprintln!("No labeled branches");
        }
        return Ok(());
    }

    let width = labels
        .values()
        .map(|l| l.short().len())
        .max()
        .unwrap_or(0);
    for (branch, label) in &labels {
        println!("{:width$}  {}", label.short(), branch, width = width);
    }

    Ok(())
}
