//! core::tag
//!
//! Encoding between a (label, branch) pair and a tag name.
//!
//! # Layout
//!
//! ```text
//! cindy/<label-short-form>/<branch>
//! ```
//!
//! The branch is appended verbatim, so it may contain any number of `/`
//! separators. Decoding is therefore driven by the known label short forms
//! rather than by splitting on separators.
//!
//! # Example
//!
//! ```
//! use cindy::core::label::Label;
//! use cindy::core::tag::{parse_tag, tag_name};
//! use cindy::core::types::BranchName;
//!
//! let branch = BranchName::new("feature/deep/nested/branch").unwrap();
//! let tag = tag_name(Label::HumanReview, &branch);
//! assert_eq!(tag, "cindy/human-review/feature/deep/nested/branch");
//!
//! let parsed = parse_tag(&tag).unwrap();
//! assert_eq!(parsed.label, Label::HumanReview);
//! assert_eq!(parsed.branch, branch);
//! ```

use super::label::Label;
use super::types::BranchName;

/// Prefix shared by every Cindy tag.
pub const TAG_PREFIX: &str = "cindy/";

/// Separator between the label segment and the branch.
pub const TAG_SEPARATOR: char = '/';

/// A decoded Cindy tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTag {
    /// The label the tag carries.
    pub label: Label,
    /// The branch the label is attached to.
    pub branch: BranchName,
}

impl LabelTag {
    /// Re-encode this pair as a tag name.
    pub fn tag_name(&self) -> String {
        tag_name(self.label, &self.branch)
    }
}

/// Encode a label and branch as a tag name.
pub fn tag_name(label: Label, branch: &BranchName) -> String {
    format!(
        "{}{}{}{}",
        TAG_PREFIX,
        label.short(),
        TAG_SEPARATOR,
        branch.as_str()
    )
}

/// Decode a tag name.
///
/// Returns `None` when the tag lacks the Cindy prefix, names no known label,
/// or carries an empty branch.
///
/// Labels are tried in canonical enumeration order and the first whose short
/// form (plus separator) prefixes the remainder decides the result. If that
/// match leaves no branch, the tag is rejected outright rather than retried
/// against later labels. A decoder that kept scanning would behave the same
/// for the current vocabulary, since no short form prefixes another.
pub fn parse_tag(tag: &str) -> Option<LabelTag> {
    let rest = tag.strip_prefix(TAG_PREFIX)?;

    let (label, branch) = Label::ALL.into_iter().find_map(|label| {
        rest.strip_prefix(label.short())
            .and_then(|r| r.strip_prefix(TAG_SEPARATOR))
            .map(|branch| (label, branch))
    })?;

    let branch = BranchName::new(branch).ok()?;
    Some(LabelTag { label, branch })
}
