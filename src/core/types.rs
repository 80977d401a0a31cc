//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - The unit of work a label is attached to
//!
//! # Validation
//!
//! Branch names are opaque to Cindy. The only rule enforced here is that a
//! branch name is non-empty, because a tag must always carry a branch after
//! its label segment. Whether the repository accepts the name as part of a
//! tag is decided by the repository when the tag is written.
//!
//! # Examples
//!
//! ```
//! use cindy::core::types::BranchName;
//!
//! let branch = BranchName::new("feature/deep/nested/branch").unwrap();
//! assert_eq!(branch.as_str(), "feature/deep/nested/branch");
//!
//! assert!(BranchName::new("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),
}

/// A branch identifier.
///
/// Hierarchical names such as `feature/foo/bar` are allowed and are kept
/// verbatim; separators are never escaped or normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for BranchName {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for BranchName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_hierarchical_names() {
        assert!(BranchName::new("main").is_ok());
        assert!(BranchName::new("feature/foo").is_ok());
        assert!(BranchName::new("feature/deep/nested/branch").is_ok());
        assert!(BranchName::new("hotfix/urgent-fix").is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            BranchName::new(""),
            Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into()
            ))
        );
    }

    #[test]
    fn separators_are_kept_verbatim() {
        let branch = BranchName::new("a/b/c").unwrap();
        assert_eq!(branch.as_str(), "a/b/c");
        assert_eq!(branch.to_string(), "a/b/c");
    }

    #[test]
    fn serde_roundtrip() {
        let branch = BranchName::new("feature/foo").unwrap();
        let json = serde_json::to_string(&branch).unwrap();
        assert_eq!(json, "\"feature/foo\"");
        let parsed: BranchName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, branch);
    }

    #[test]
    fn serde_rejects_empty() {
        let result: Result<BranchName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = BranchName::new("feature/a").unwrap();
        let b = BranchName::new("feature/b").unwrap();
        assert!(a < b);
    }
}
