//! validate command - Check a manifest's schema changes

use std::path::Path;

use super::{manifest_location, open_workspace};
use crate::core::manifest::load_manifest;
use crate::core::safety::validate_schema_changes;
use crate::engine::Context;
use anyhow::{bail, Context as _, Result};

/// Print every schema violation in a manifest.
///
/// Fails when the manifest cannot be read or is not schema-safe.
pub fn validate(ctx: &Context, manifest: Option<&Path>) -> Result<()> {
    let path = match manifest {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => ctx.cwd()?.join(path),
        None => {
            let ws = open_workspace(ctx)?;
            manifest_location(ctx, &ws.root, &ws.config, None)?
        }
    };

    let manifest = load_manifest(&path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    let violations = validate_schema_changes(&manifest);

    if violations.is_empty() {
        if !ctx.quiet {
            println!(
                "Manifest is schema-safe ({} schema change{})",
                manifest.schema_changes.len(),
                if manifest.schema_changes.len() == 1 { "" } else { "s" }
            );
        }
        return Ok(());
    }

    for violation in &violations {
        println!("{}", violation);
    }
    bail!(
        "{} schema violation{}",
        violations.len(),
        if violations.len() == 1 { "" } else { "s" }
    );
}
