//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads and
//! writes flow through this interface. No other module should import `git2`
//! or spawn the `git` binary.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Tag enumeration by prefix, creation at HEAD, deletion
//! - Remote lookup, tag push and remote tag deletion
//!
//! # Invariants
//!
//! - Local tag operations use `git2`; only remote sync runs `git`
//! - Each call is independent; no locking across calls
//!
//! # Example
//!
//! ```ignore
//! use cindy::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let tags = git.list_tags("cindy/")?;
//! if git.has_remote("origin") {
//!     git.push_tag("origin", &tags[0])?;
//! }
//! ```

mod interface;

pub use interface::{Git, GitError, RepoInfo};
