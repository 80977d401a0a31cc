//! core::store
//!
//! Label storage.
//!
//! # Modules
//!
//! - [`tags`] - Labels persisted as tags in a Git repository
//! - [`memory`] - Labels held in process memory
//!
//! # Architecture
//!
//! Both backings implement [`LabelStore`] and share no state. A branch has
//! at most one label at a time; `set_label` replaces whatever was there.
//!
//! # Example
//!
//! ```
//! use cindy::core::label::Label;
//! use cindy::core::store::{LabelStore, MemoryLabelStore};
//! use cindy::core::types::BranchName;
//!
//! let mut store = MemoryLabelStore::new();
//! let branch = BranchName::new("feature/foo").unwrap();
//!
//! assert_eq!(store.get_label(&branch).unwrap(), None);
//! store.set_label(&branch, Label::Ready).unwrap();
//! assert_eq!(store.get_label(&branch).unwrap(), Some(Label::Ready));
//! ```

pub mod memory;
pub mod tags;

use std::collections::BTreeMap;

use thiserror::Error;

use super::label::Label;
use super::types::BranchName;
use crate::git::GitError;

pub use memory::MemoryLabelStore;
pub use tags::TagLabelStore;

/// Errors from label storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Removing the previous label tag failed.
    #[error("failed to delete old tag {tag}: {source}")]
    DeleteTag {
        tag: String,
        #[source]
        source: GitError,
    },

    /// Creating the new label tag failed.
    #[error("failed to create tag {tag}: {source}")]
    CreateTag {
        tag: String,
        #[source]
        source: GitError,
    },

    /// Any other Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] GitError),
}

/// Capability interface over label storage.
///
/// Absence of a label is not an error: `get_label` returns `Ok(None)`.
pub trait LabelStore {
    /// Current label of a branch, if any.
    fn get_label(&self, branch: &BranchName) -> Result<Option<Label>, StoreError>;

    /// Replace the label of a branch.
    fn set_label(&mut self, branch: &BranchName, label: Label) -> Result<(), StoreError>;

    /// Every labeled branch.
    ///
    /// The returned map is owned by the caller; changing it has no effect on
    /// the store.
    fn all_labels(&self) -> Result<BTreeMap<BranchName, Label>, StoreError>;
}
