//! core::label
//!
//! The label vocabulary and the transition table that form the pipeline
//! state machine.
//!
//! # Vocabulary
//!
//! The set of labels is closed. Every label has a qualified form
//! (`cindy:human-review`) and a short form (`human-review`). The short form
//! is what appears inside tag names.
//!
//! # Transitions
//!
//! ```text
//! Ready             -> Analyzing
//! Analyzing         -> Approved | Rejected | HumanReview | Blocked | RevisionRequested
//! Approved          -> Deploying | Blocked
//! Blocked           -> Approved
//! Deploying         -> Deployed | Rollback
//! HumanReview       -> Approved | Rejected | RevisionRequested
//! RevisionRequested -> Ready
//! Deployed          -> Rollback
//! ```
//!
//! `Rejected` and `Rollback` are terminal.
//!
//! # Example
//!
//! ```
//! use cindy::core::label::Label;
//!
//! assert!(Label::Ready.can_transition(Label::Analyzing));
//! assert!(!Label::Ready.can_transition(Label::Deployed));
//! assert!(Label::Rollback.is_terminal());
//! ```

use serde::{Deserialize, Serialize};

/// Namespace qualifier carried by the qualified form of every label.
pub const LABEL_QUALIFIER: &str = "cindy:";

/// A pipeline label.
///
/// Variants are declared in canonical enumeration order; [`Label::ALL`]
/// lists them in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "cindy:ready")]
    Ready,
    #[serde(rename = "cindy:analyzing")]
    Analyzing,
    #[serde(rename = "cindy:approved")]
    Approved,
    #[serde(rename = "cindy:blocked")]
    Blocked,
    #[serde(rename = "cindy:deploying")]
    Deploying,
    #[serde(rename = "cindy:deployed")]
    Deployed,
    #[serde(rename = "cindy:rejected")]
    Rejected,
    #[serde(rename = "cindy:rollback")]
    Rollback,
    #[serde(rename = "cindy:human-review")]
    HumanReview,
    #[serde(rename = "cindy:revision-requested")]
    RevisionRequested,
}

impl Label {
    /// Every label, in canonical enumeration order.
    pub const ALL: [Label; 10] = [
        Label::Ready,
        Label::Analyzing,
        Label::Approved,
        Label::Blocked,
        Label::Deploying,
        Label::Deployed,
        Label::Rejected,
        Label::Rollback,
        Label::HumanReview,
        Label::RevisionRequested,
    ];

    /// The qualified form, e.g. `cindy:approved`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ready => "cindy:ready",
            Label::Analyzing => "cindy:analyzing",
            Label::Approved => "cindy:approved",
            Label::Blocked => "cindy:blocked",
            Label::Deploying => "cindy:deploying",
            Label::Deployed => "cindy:deployed",
            Label::Rejected => "cindy:rejected",
            Label::Rollback => "cindy:rollback",
            Label::HumanReview => "cindy:human-review",
            Label::RevisionRequested => "cindy:revision-requested",
        }
    }

    /// The short form, with the `cindy:` qualifier stripped.
    ///
    /// # Example
    ///
    /// ```
    /// use cindy::core::label::Label;
    ///
    /// assert_eq!(Label::HumanReview.short(), "human-review");
    /// ```
    pub fn short(&self) -> &'static str {
        let qualified = self.as_str();
        qualified
            .strip_prefix(LABEL_QUALIFIER)
            .unwrap_or(qualified)
    }

    /// Parse a label from either its qualified or its short form.
    ///
    /// Returns `None` for anything outside the vocabulary.
    pub fn parse(s: &str) -> Option<Label> {
        let short = s.strip_prefix(LABEL_QUALIFIER).unwrap_or(s);
        Label::ALL.into_iter().find(|l| l.short() == short)
    }

    /// Labels reachable in one step from this one.
    ///
    /// Terminal labels return an empty slice.
    pub fn valid_transitions(&self) -> &'static [Label] {
        match self {
            Label::Ready => &[Label::Analyzing],
            Label::Analyzing => &[
                Label::Approved,
                Label::Rejected,
                Label::HumanReview,
                Label::Blocked,
                Label::RevisionRequested,
            ],
            Label::Approved => &[Label::Deploying, Label::Blocked],
            Label::Blocked => &[Label::Approved],
            Label::Deploying => &[Label::Deployed, Label::Rollback],
            Label::HumanReview => &[Label::Approved, Label::Rejected, Label::RevisionRequested],
            Label::RevisionRequested => &[Label::Ready],
            Label::Deployed => &[Label::Rollback],
            Label::Rejected | Label::Rollback => &[],
        }
    }

    /// Check whether moving from this label to `to` is legal.
    pub fn can_transition(&self, to: Label) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Check whether this label has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Check whether entering this label moves a change toward production.
    ///
    /// Transitions into these labels are subject to schema and review gates.
    pub fn is_progression(&self) -> bool {
        matches!(self, Label::Approved | Label::Deploying | Label::Deployed)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string does not name a label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl std::str::FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::parse(s).ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Check legality for labels held as raw strings.
///
/// Strings outside the vocabulary are never transitionable, in either
/// position.
pub fn can_transition_named(from: &str, to: &str) -> bool {
    match (Label::parse(from), Label::parse(to)) {
        (Some(from), Some(to)) => from.can_transition(to),
        _ => false,
    }
}

/// Legal destinations for a label held as a raw string.
///
/// Unknown labels have no destinations.
pub fn valid_transitions_named(from: &str) -> &'static [Label] {
    match Label::parse(from) {
        Some(label) => label.valid_transitions(),
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_ten_labels() {
        assert_eq!(Label::ALL.len(), 10);
    }

    #[test]
    fn short_forms() {
        let expected = [
            (Label::Ready, "ready"),
            (Label::Analyzing, "analyzing"),
            (Label::Approved, "approved"),
            (Label::Blocked, "blocked"),
            (Label::Deploying, "deploying"),
            (Label::Deployed, "deployed"),
            (Label::Rejected, "rejected"),
            (Label::Rollback, "rollback"),
            (Label::HumanReview, "human-review"),
            (Label::RevisionRequested, "revision-requested"),
        ];
        for (label, short) in expected {
            assert_eq!(label.short(), short);
            assert_eq!(label.as_str(), format!("cindy:{}", short));
        }
    }

    #[test]
    fn parse_accepts_both_forms() {
        assert_eq!(Label::parse("approved"), Some(Label::Approved));
        assert_eq!(Label::parse("cindy:approved"), Some(Label::Approved));
        assert_eq!(
            "revision-requested".parse::<Label>(),
            Ok(Label::RevisionRequested)
        );
        assert_eq!(Label::parse("unknown"), None);
        assert_eq!(Label::parse("cindy:unknown"), None);
        assert_eq!(Label::parse(""), None);
        assert!("bogus".parse::<Label>().is_err());
    }

    #[test]
    fn valid_paths() {
        let valid = [
            (Label::Ready, Label::Analyzing),
            (Label::Analyzing, Label::Approved),
            (Label::Analyzing, Label::Rejected),
            (Label::Analyzing, Label::HumanReview),
            (Label::Analyzing, Label::Blocked),
            (Label::Analyzing, Label::RevisionRequested),
            (Label::Approved, Label::Deploying),
            (Label::Approved, Label::Blocked),
            (Label::Blocked, Label::Approved),
            (Label::Deploying, Label::Deployed),
            (Label::Deploying, Label::Rollback),
            (Label::HumanReview, Label::Approved),
            (Label::HumanReview, Label::Rejected),
            (Label::HumanReview, Label::RevisionRequested),
            (Label::RevisionRequested, Label::Ready),
            (Label::Deployed, Label::Rollback),
        ];
        for (from, to) in valid {
            assert!(from.can_transition(to), "{} -> {} should be legal", from, to);
        }
    }

    #[test]
    fn invalid_paths() {
        let invalid = [
            (Label::Ready, Label::Deployed),
            (Label::Ready, Label::Approved),
            (Label::Analyzing, Label::Deploying),
            (Label::Approved, Label::Deployed),
            (Label::Deployed, Label::Approved),
            (Label::Rejected, Label::Ready),
            (Label::Rollback, Label::Ready),
            (Label::Blocked, Label::Deploying),
            (Label::Deploying, Label::Approved),
            (Label::HumanReview, Label::Deploying),
        ];
        for (from, to) in invalid {
            assert!(!from.can_transition(to), "{} -> {} should be illegal", from, to);
        }
    }

    #[test]
    fn no_self_loops() {
        for label in Label::ALL {
            assert!(!label.can_transition(label));
        }
    }

    #[test]
    fn destinations_keep_declared_order() {
        assert_eq!(Label::Ready.valid_transitions(), &[Label::Analyzing]);
        assert_eq!(
            Label::Analyzing.valid_transitions(),
            &[
                Label::Approved,
                Label::Rejected,
                Label::HumanReview,
                Label::Blocked,
                Label::RevisionRequested,
            ]
        );
    }

    #[test]
    fn terminal_labels() {
        assert!(Label::Rejected.is_terminal());
        assert!(Label::Rollback.is_terminal());
        assert!(!Label::Ready.is_terminal());
        // Deployed can still roll back.
        assert!(!Label::Deployed.is_terminal());

        let terminal: Vec<Label> = Label::ALL.into_iter().filter(|l| l.is_terminal()).collect();
        assert_eq!(terminal, vec![Label::Rejected, Label::Rollback]);
    }

    #[test]
    fn unknown_names_never_transition() {
        assert!(!can_transition_named("cindy:unknown", "cindy:ready"));
        assert!(!can_transition_named("ready", "nonsense"));
        assert!(!can_transition_named("", ""));
        assert!(can_transition_named("cindy:ready", "analyzing"));
        assert!(valid_transitions_named("cindy:unknown").is_empty());
        assert_eq!(valid_transitions_named("deployed"), &[Label::Rollback]);
    }

    #[test]
    fn progression_labels() {
        let progression: Vec<Label> = Label::ALL
            .into_iter()
            .filter(|l| l.is_progression())
            .collect();
        assert_eq!(
            progression,
            vec![Label::Approved, Label::Deploying, Label::Deployed]
        );
    }

    #[test]
    fn serde_uses_qualified_form() {
        let json = serde_json::to_string(&Label::HumanReview).unwrap();
        assert_eq!(json, "\"cindy:human-review\"");
        let parsed: Label = serde_json::from_str("\"cindy:rollback\"").unwrap();
        assert_eq!(parsed, Label::Rollback);
    }
}
