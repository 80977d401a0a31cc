//! engine::gate
//!
//! Gates that must be clear before a branch moves toward production.
//!
//! # Architecture
//!
//! Legality (the transition table) decides whether a move is *possible*.
//! Gating decides whether it is *allowed right now*. Only transitions into
//! progression labels are gated:
//!
//! - **Schema gate**: when the manifest declares schema changes, every
//!   violation of the additive-only rule blocks.
//! - **Review gate**: every review that is blocking (changes requested with
//!   unresolved comments) blocks.
//!
//! # Invariants
//!
//! - Gating is pure and deterministic given the same inputs
//! - All findings are collected; gating never stops at the first one

use crate::core::label::Label;
use crate::core::manifest::Manifest;
use crate::core::review::Review;
use crate::core::safety::{validate_schema_changes, SchemaViolation};

/// A review that blocks progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingReview {
    /// Review id.
    pub id: String,
    /// Reviewer.
    pub actor: String,
    /// Number of unresolved comments.
    pub unresolved: usize,
}

impl std::fmt::Display for BlockingReview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "review {} by {} requests changes ({} unresolved comment{})",
            self.id,
            self.actor,
            self.unresolved,
            if self.unresolved == 1 { "" } else { "s" }
        )
    }
}

/// Everything that stands between a branch and its target label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateReport {
    pub violations: Vec<SchemaViolation>,
    pub blocking_reviews: Vec<BlockingReview>,
}

impl GateReport {
    /// Check whether nothing blocks.
    pub fn is_clear(&self) -> bool {
        self.violations.is_empty() && self.blocking_reviews.is_empty()
    }

    /// One line per finding.
    pub fn reasons(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(ToString::to_string)
            .chain(self.blocking_reviews.iter().map(ToString::to_string))
            .collect()
    }
}

impl std::fmt::Display for GateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reasons().join("; "))
    }
}

/// Evaluate the gates for a move into `target`.
///
/// Non-progression targets are never gated and produce a clear report.
pub fn evaluate(target: Label, manifest: Option<&Manifest>, reviews: &[Review]) -> GateReport {
    if !target.is_progression() {
        return GateReport::default();
    }

    let violations = match manifest {
        Some(m) if m.has_schema_changes() => validate_schema_changes(m),
        _ => Vec::new(),
    };

    let blocking_reviews = reviews
        .iter()
        .filter(|r| r.is_blocking())
        .map(|r| BlockingReview {
            id: r.id.clone(),
            actor: r.actor.clone(),
            unresolved: r.unresolved_comments().len(),
        })
        .collect();

    GateReport {
        violations,
        blocking_reviews,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::manifest::{SchemaChange, SchemaChangeType};
    use crate::core::review::{ReviewComment, Verdict};
    use chrono::{TimeZone, Utc};

    pub(crate) fn unsafe_manifest() -> Manifest {
        Manifest {
            schema_changes: vec![SchemaChange {
                subject: "payments.order".into(),
                kind: SchemaChangeType::Extension,
                fields_added: vec![],
                fields_removed: vec!["legacy_currency".into()],
                fields_modified: vec!["amount".into()],
            }],
            ..Default::default()
        }
    }

    pub(crate) fn review(id: &str, verdict: Verdict, resolved: &[bool]) -> Review {
        Review {
            id: id.into(),
            branch: "feature/foo".into(),
            revision: 1,
            actor: "schema-agent".into(),
            verdict,
            comments: resolved
                .iter()
                .enumerate()
                .map(|(i, &resolved)| ReviewComment {
                    id: format!("c{}", i),
                    file: None,
                    line: None,
                    body: "fix".into(),
                    resolved,
                })
                .collect(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn non_progression_targets_are_not_gated() {
        let m = unsafe_manifest();
        let reviews = [review("r1", Verdict::RequestChanges, &[false])];
        for target in [Label::Analyzing, Label::Blocked, Label::Rollback, Label::Rejected] {
            assert!(evaluate(target, Some(&m), &reviews).is_clear());
        }
    }

    #[test]
    fn schema_violations_block() {
        let m = unsafe_manifest();
        let report = evaluate(Label::Approved, Some(&m), &[]);
        assert_eq!(report.violations.len(), 2);
        assert!(!report.is_clear());
    }

    #[test]
    fn safe_manifest_is_clear() {
        let m = Manifest {
            schema_changes: vec![SchemaChange::additive(
                "marketing.sale.completed",
                SchemaChangeType::Extension,
                ["loyalty_tier"],
            )],
            ..Default::default()
        };
        assert!(evaluate(Label::Deploying, Some(&m), &[]).is_clear());
        assert!(evaluate(Label::Deploying, None, &[]).is_clear());
    }

    #[test]
    fn blocking_reviews_collected() {
        let reviews = [
            review("r1", Verdict::RequestChanges, &[false, false, true]),
            review("r2", Verdict::RequestChanges, &[true]),
            review("r3", Verdict::Comment, &[false]),
        ];
        let report = evaluate(Label::Approved, None, &reviews);
        assert_eq!(
            report.blocking_reviews,
            vec![BlockingReview {
                id: "r1".into(),
                actor: "schema-agent".into(),
                unresolved: 2,
            }]
        );
    }

    #[test]
    fn all_findings_reported() {
        let m = unsafe_manifest();
        let reviews = [review("r1", Verdict::RequestChanges, &[false])];
        let report = evaluate(Label::Deployed, Some(&m), &reviews);
        let reasons = report.reasons();
        assert_eq!(reasons.len(), 3);
        assert!(reasons[0].contains("legacy_currency"));
        assert!(reasons[1].contains("amount"));
        assert!(reasons[2].contains("1 unresolved comment)"));
    }
}
