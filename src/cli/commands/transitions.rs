//! transitions command - Show legal next labels

use super::parse_label;
use crate::engine::Context;
use anyhow::Result;

/// Print the labels `label` may move to, one per line, or `terminal`.
pub fn transitions(_ctx: &Context, label: &str) -> Result<()> {
    let label = parse_label(label)?;

    if label.is_terminal() {
        println!("terminal");
        return Ok(());
    }

    for next in label.valid_transitions() {
        println!("{}", next.short());
    }

    Ok(())
}
