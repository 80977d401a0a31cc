//! Cindy - a label-driven deployment protocol over git
//!
//! Each branch carries at most one pipeline label. Labels are stored as
//! lightweight git tags named `cindy/<label>/<branch>` and mirrored to a
//! remote, so the repository itself is the state machine.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`engine`] - Legality -> Gate -> Commit for label changes
//! - [`core`] - Labels, the tag codec, stores, manifests, reviews, config
//! - [`git`] - Single interface for all Git operations
//!
//! # Correctness Invariants
//!
//! 1. A branch has at most one label tag after any successful write
//! 2. Only transitions in the label table are taken by [`engine::advance`]
//! 3. Progression labels are never entered past a schema violation or a
//!    blocking review
//! 4. Remote mirroring never fails a local write

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
