//! advance command - Move a branch to its next label
//!
//! Unlike `label set`, this checks the transition table and, for
//! progression labels, the schema and review gates.

use std::path::{Path, PathBuf};

use super::{manifest_location, open_workspace, parse_branch, parse_label};
use crate::core::manifest::{load_manifest, Manifest};
use crate::core::review::{load_review, Review};
use crate::engine::{self, Context, TransitionError, TransitionRequest};
use anyhow::{bail, Context as _, Result};

/// Advance `branch` to `label`.
///
/// The manifest comes from `manifest` when given, otherwise from the
/// configured location if a file exists there. Each path in `reviews` is
/// loaded as a review of the branch's current revision.
pub fn advance(
    ctx: &Context,
    branch: &str,
    label: &str,
    manifest: Option<&Path>,
    reviews: &[PathBuf],
) -> Result<()> {
    let branch = parse_branch(branch)?;
    let label = parse_label(label)?;
    let mut ws = open_workspace(ctx)?;

    let manifest_path = manifest_location(ctx, &ws.root, &ws.config, manifest)?;
    let manifest: Option<Manifest> = if manifest.is_some() || manifest_path.is_file() {
        let loaded = load_manifest(&manifest_path)
            .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
        Some(loaded)
    } else {
        tracing::debug!(path = %manifest_path.display(), "no manifest found");
        None
    };

    let reviews = reviews
        .iter()
        .map(|path| {
            load_review(path).with_context(|| format!("Failed to load review {}", path.display()))
        })
        .collect::<Result<Vec<Review>>>()?;

    let mut request = TransitionRequest::new(&branch, label).with_reviews(&reviews);
    if let Some(manifest) = manifest.as_ref() {
        request = request.with_manifest(manifest);
    }

    match engine::advance(&mut ws.store, request) {
        Ok(done) => {
            if !ctx.quiet {
                match done.from {
                    Some(from) => {
                        println!("{}: {} -> {}", done.branch, from.short(), done.to.short())
                    }
                    None => println!("{}: {}", done.branch, done.to.short()),
                }
            }
            Ok(())
        }
        Err(TransitionError::Gated(report)) => {
            for reason in report.reasons() {
                eprintln!("  {}", reason);
            }
            bail!("{}: cannot advance to {}, gate blocked", branch, label.short());
        }
        Err(err @ TransitionError::Illegal { .. }) => {
            if let TransitionError::Illegal { from: Some(from), .. } = &err {
                let next: Vec<&str> = from.valid_transitions().iter().map(|l| l.short()).collect();
                if next.is_empty() {
                    eprintln!("  {} is terminal", from.short());
                } else {
                    eprintln!("  allowed from {}: {}", from.short(), next.join(", "));
                }
            }
            Err(err.into())
        }
        Err(err) => Err(err).context("Failed to update label"),
    }
}
