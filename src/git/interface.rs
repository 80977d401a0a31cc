//! git::interface
//!
//! Git interface implementation.
//!
//! This module provides the **single doorway** to all Git operations in
//! Cindy. Local tag reads and writes go through `git2`; remote mirroring
//! shells out to the `git` binary so the user's configured transports and
//! credential helpers apply.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::TagExists`]: A tag with that name already exists
//! - [`GitError::TagNotFound`]: Requested tag does not exist
//! - [`GitError::UnbornHead`]: HEAD has no commit to tag
//! - [`GitError::CommandFailed`]: The `git` binary exited unsuccessfully
//!
//! # Example
//!
//! ```ignore
//! use cindy::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! git.create_tag_at_head("cindy/ready/feature/foo")?;
//! for tag in git.list_tags("cindy/")? {
//!     println!("{}", tag);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// HEAD does not point at a commit (new repository).
    #[error("HEAD has no commit")]
    UnbornHead,

    /// Tag already exists.
    #[error("tag already exists: {tag}")]
    TagExists { tag: String },

    /// Tag does not exist.
    #[error("tag not found: {tag}")]
    TagNotFound { tag: String },

    /// Tag name is not a valid ref name.
    #[error("invalid tag name '{tag}': {message}")]
    InvalidTagName { tag: String, message: String },

    /// The git binary exited unsuccessfully or could not be started.
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed {
        /// Arguments passed to git, space separated
        command: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error raised while operating on a tag.
    fn from_git2_tag(err: git2::Error, tag: &str) -> Self {
        match err.code() {
            git2::ErrorCode::Exists => GitError::TagExists {
                tag: tag.to_string(),
            },
            git2::ErrorCode::NotFound => GitError::TagNotFound {
                tag: tag.to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidTagName {
                tag: tag.to_string(),
                message: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", tag, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory (or the repository itself when bare)
    pub git_dir: PathBuf,
    /// Path to working directory, absent for bare repositories
    pub work_dir: Option<PathBuf>,
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2` or spawns `git`.
///
/// Operations are independent and non-transactional; nothing here locks the
/// repository across calls.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root, so
    /// `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Get repository information.
    pub fn info(&self) -> RepoInfo {
        RepoInfo {
            git_dir: self.repo.path().to_path_buf(),
            work_dir: self.repo.workdir().map(Path::to_path_buf),
        }
    }

    /// Directory the `git` binary is run in.
    fn command_dir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Get the HEAD commit id as a hex string.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<String, GitError> {
        Ok(self.head_commit()?.id().to_string())
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>, GitError> {
        let head = self.repo.head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound => GitError::UnbornHead,
            _ => GitError::from(e),
        })?;
        Ok(head.peel_to_commit()?)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// List tag names starting with a literal prefix, sorted.
    ///
    /// The prefix is matched literally, not as a glob.
    pub fn list_tags(&self, prefix: &str) -> Result<Vec<String>, GitError> {
        let names = self.repo.tag_names(None)?;

        let mut tags: Vec<String> = names
            .iter()
            .flatten() // Skip tags with non-UTF8 names
            .filter(|name| name.starts_with(prefix))
            .map(String::from)
            .collect();
        tags.sort();

        Ok(tags)
    }

    /// Resolve a tag to the commit it points at.
    ///
    /// Returns `Ok(None)` if the tag doesn't exist.
    pub fn tag_target(&self, tag: &str) -> Result<Option<String>, GitError> {
        let refname = format!("refs/tags/{}", tag);
        match self.repo.find_reference(&refname) {
            Ok(reference) => {
                let commit = reference
                    .peel_to_commit()
                    .map_err(|e| GitError::from_git2_tag(e, tag))?;
                Ok(Some(commit.id().to_string()))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::from_git2_tag(e, tag)),
        }
    }

    /// Create a lightweight tag at the current HEAD commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::TagExists`] if the tag already exists
    /// - [`GitError::InvalidTagName`] if the name is not a valid ref name
    /// - [`GitError::UnbornHead`] if there is no commit to tag
    pub fn create_tag_at_head(&self, tag: &str) -> Result<(), GitError> {
        let head = self.head_commit()?;
        self.repo
            .tag_lightweight(tag, head.as_object(), false)
            .map_err(|e| GitError::from_git2_tag(e, tag))?;
        Ok(())
    }

    /// Delete a local tag.
    ///
    /// # Errors
    ///
    /// - [`GitError::TagNotFound`] if the tag doesn't exist
    pub fn delete_tag(&self, tag: &str) -> Result<(), GitError> {
        self.repo
            .tag_delete(tag)
            .map_err(|e| GitError::from_git2_tag(e, tag))
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a remote is configured.
    pub fn has_remote(&self, name: &str) -> bool {
        matches!(self.remote_url(name), Ok(Some(_)))
    }

    /// Push a local tag to a remote.
    pub fn push_tag(&self, remote: &str, tag: &str) -> Result<(), GitError> {
        let refspec = format!("refs/tags/{}", tag);
        self.run_git(&["push", remote, &refspec]).map(|_| ())
    }

    /// Delete a tag on a remote.
    pub fn push_delete_tag(&self, remote: &str, tag: &str) -> Result<(), GitError> {
        let refspec = format!("refs/tags/{}", tag);
        self.run_git(&["push", remote, "--delete", &refspec])
            .map(|_| ())
    }

    /// Run the git binary in this repository and return its stdout.
    ///
    /// No retries; the call returns or fails within git's own timeouts.
    fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        tracing::debug!(%command, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(self.command_dir())
            .output()
            .map_err(|e| GitError::CommandFailed {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
