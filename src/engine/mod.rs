//! engine
//!
//! Orchestrates a label change: Legality -> Gate -> Commit.
//!
//! # Architecture
//!
//! 1. **Legality**: the transition table decides whether the move exists
//! 2. **Gate**: schema safety and review state decide whether it may happen
//!    now (progression labels only)
//! 3. **Commit**: the label is written through a [`LabelStore`]
//!
//! The engine works against any store, so the same rules apply to the
//! tag-backed store and the in-memory store.
//!
//! # Invariants
//!
//! - A rejected transition never writes to the store
//! - Gate findings are reported together, never one at a time
//!
//! [`LabelStore`]: crate::core::store::LabelStore

pub mod advance;
pub mod gate;

use std::path::PathBuf;

pub use advance::{advance, is_legal, Advance, TransitionError, TransitionRequest, ENTRY_LABEL};
pub use gate::{evaluate, BlockingReview, GateReport};

/// Execution context shared by command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Directory commands operate in.
    pub fn cwd(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
