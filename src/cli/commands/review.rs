//! review command - Show whether a review blocks progression

use std::path::Path;

use crate::core::review::load_review;
use crate::engine::Context;
use anyhow::{Context as _, Result};

/// Print a review's verdict, its unresolved comments, and whether it blocks.
pub fn review(ctx: &Context, path: &Path) -> Result<()> {
    let review =
        load_review(path).with_context(|| format!("Failed to load review {}", path.display()))?;

    if !ctx.quiet {
        println!(
            "Review {} by {} on {} (revision {}): {}",
            review.id, review.actor, review.branch, review.revision, review.verdict
        );
        for comment in review.unresolved_comments() {
            let location = match (&comment.file, comment.line) {
                (Some(file), Some(line)) => format!(" {}:{}:", file, line),
                (Some(file), None) => format!(" {}:", file),
                _ => String::new(),
            };
            println!("  [{}]{} {}", comment.id, location, comment.body);
        }
    }

    if review.is_blocking() {
        println!("blocking");
    } else {
        println!("not blocking");
    }

    Ok(())
}
