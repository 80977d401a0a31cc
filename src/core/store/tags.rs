//! core::store::tags
//!
//! Labels persisted as Git tags.
//!
//! # Architecture
//!
//! Each labeled branch is represented by one lightweight tag named
//! `cindy/<label>/<branch>` (see [`crate::core::tag`]) pointing at the HEAD
//! commit when the label was set. Only tags under the `cindy/` prefix are
//! read; tags that do not decode are ignored.
//!
//! # Remote Mirroring
//!
//! The local repository is the source of truth. After a local change the
//! store pushes the new tag to the configured remote and deletes replaced
//! tags there, but failures on the remote are logged and swallowed. Local
//! failures abort the operation.
//!
//! # Concurrency
//!
//! `set_label` is a sequence of independent operations (list, delete,
//! create, push) with no lock. Two processes relabeling the same branch can
//! race; callers needing exclusivity must serialize externally.
//!
//! # Example
//!
//! ```ignore
//! use cindy::core::label::Label;
//! use cindy::core::store::{LabelStore, TagLabelStore};
//! use cindy::core::types::BranchName;
//!
//! let mut store = TagLabelStore::open(Path::new("."))?;
//! let branch = BranchName::new("feature/foo")?;
//! store.set_label(&branch, Label::Approved)?;
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use super::{LabelStore, StoreError};
use crate::core::label::Label;
use crate::core::tag::{parse_tag, tag_name, LabelTag, TAG_PREFIX};
use crate::core::types::BranchName;
use crate::git::Git;

/// Remote used for mirroring unless configured otherwise.
pub const DEFAULT_REMOTE: &str = "origin";

/// Label store backed by tags in a Git repository.
#[derive(Debug)]
pub struct TagLabelStore {
    git: Git,
    remote: String,
    sync_remote: bool,
}

impl TagLabelStore {
    /// Open the repository at `path` and build a store over it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Git`] wrapping `GitError::NotARepo` if `path` is not
    ///   inside a repository
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(Git::open(path)?))
    }

    /// Build a store over an already opened repository.
    pub fn new(git: Git) -> Self {
        Self {
            git,
            remote: DEFAULT_REMOTE.to_string(),
            sync_remote: true,
        }
    }

    /// Mirror to a remote other than `origin`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Enable or disable remote mirroring.
    pub fn with_remote_sync(mut self, enabled: bool) -> Self {
        self.sync_remote = enabled;
        self
    }

    /// The underlying repository.
    pub fn git(&self) -> &Git {
        &self.git
    }

    /// The remote tags are mirrored to.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Every prefixed tag that decodes, with its raw name.
    fn decoded_tags(&self) -> Result<Vec<(String, LabelTag)>, StoreError> {
        let tags = self.git.list_tags(TAG_PREFIX)?;
        Ok(tags
            .into_iter()
            .filter_map(|tag| parse_tag(&tag).map(|decoded| (tag, decoded)))
            .collect())
    }

    /// Whether remote mirroring should be attempted at all.
    fn mirroring(&self) -> bool {
        if !self.sync_remote {
            return false;
        }
        if !self.git.has_remote(&self.remote) {
            tracing::debug!(remote = %self.remote, "remote not configured, skipping tag sync");
            return false;
        }
        true
    }

    fn mirror_delete(&self, tag: &str) {
        if let Err(e) = self.git.push_delete_tag(&self.remote, tag) {
            tracing::warn!(%tag, remote = %self.remote, error = %e, "failed to delete remote tag");
        }
    }

    fn mirror_push(&self, tag: &str) {
        if let Err(e) = self.git.push_tag(&self.remote, tag) {
            tracing::warn!(%tag, remote = %self.remote, error = %e, "failed to push tag");
        }
    }
}

impl LabelStore for TagLabelStore {
    fn get_label(&self, branch: &BranchName) -> Result<Option<Label>, StoreError> {
        Ok(self
            .decoded_tags()?
            .into_iter()
            .find(|(_, decoded)| &decoded.branch == branch)
            .map(|(_, decoded)| decoded.label))
    }

    fn set_label(&mut self, branch: &BranchName, label: Label) -> Result<(), StoreError> {
        let mirroring = self.mirroring();

        for (tag, decoded) in self.decoded_tags()? {
            if &decoded.branch != branch {
                continue;
            }
            self.git
                .delete_tag(&tag)
                .map_err(|source| StoreError::DeleteTag {
                    tag: tag.clone(),
                    source,
                })?;
            tracing::debug!(%tag, "deleted old label tag");
            if mirroring {
                self.mirror_delete(&tag);
            }
        }

        let tag = tag_name(label, branch);
        self.git
            .create_tag_at_head(&tag)
            .map_err(|source| StoreError::CreateTag {
                tag: tag.clone(),
                source,
            })?;
        tracing::debug!(%tag, "created label tag");

        if mirroring {
            self.mirror_push(&tag);
        }

        Ok(())
    }

    fn all_labels(&self) -> Result<BTreeMap<BranchName, Label>, StoreError> {
        Ok(self
            .decoded_tags()?
            .into_iter()
            .map(|(_, decoded)| (decoded.branch, decoded.label))
            .collect())
    }
}
