//! core::review
//!
//! Reviews and the review gate.
//!
//! A review blocks progression when its verdict is `request_changes` and
//! at least one of its comments is still unresolved. Every other verdict is
//! advisory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("failed to read review '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse review: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Outcome of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    RequestChanges,
    Comment,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Approve => "approve",
            Verdict::RequestChanges => "request_changes",
            Verdict::Comment => "comment",
        };
        f.write_str(s)
    }
}

/// A single piece of feedback within a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    pub body: String,
    #[serde(default)]
    pub resolved: bool,
}

/// One reviewer's verdict on one revision of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub branch: String,
    /// Manifest revision the review was written against.
    pub revision: u32,
    pub actor: String,
    pub verdict: Verdict,
    #[serde(default)]
    pub comments: Vec<ReviewComment>,
    pub timestamp: DateTime<Utc>,
}

impl Review {
    /// Check whether every comment is resolved.
    ///
    /// A review without comments is fully resolved.
    pub fn all_resolved(&self) -> bool {
        self.comments.iter().all(|c| c.resolved)
    }

    /// Comments not yet resolved, in review order.
    pub fn unresolved_comments(&self) -> Vec<&ReviewComment> {
        self.comments.iter().filter(|c| !c.resolved).collect()
    }

    /// Check whether this review blocks the pipeline.
    pub fn is_blocking(&self) -> bool {
        self.verdict == Verdict::RequestChanges && !self.all_resolved()
    }
}

/// Parse a review from JSON text.
pub fn parse_review(json: &str) -> Result<Review, ReviewError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a review file.
pub fn load_review(path: &Path) -> Result<Review, ReviewError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ReviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_review(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, resolved: bool) -> ReviewComment {
        ReviewComment {
            id: id.into(),
            file: None,
            line: None,
            body: format!("comment {}", id),
            resolved,
        }
    }

    fn review(verdict: Verdict, comments: Vec<ReviewComment>) -> Review {
        Review {
            id: "review-001".into(),
            branch: "feature/foo".into(),
            revision: 1,
            actor: "reviewer".into(),
            verdict,
            comments,
            timestamp: DateTime::parse_from_rfc3339("2026-01-15T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn no_comments_is_resolved() {
        assert!(review(Verdict::RequestChanges, vec![]).all_resolved());
    }

    #[test]
    fn all_resolved() {
        let r = review(
            Verdict::Comment,
            vec![comment("1", true), comment("2", true)],
        );
        assert!(r.all_resolved());
    }

    #[test]
    fn some_unresolved() {
        let r = review(
            Verdict::Comment,
            vec![comment("1", true), comment("2", false)],
        );
        assert!(!r.all_resolved());
    }

    #[test]
    fn unresolved_comments_keep_order() {
        let r = review(
            Verdict::Comment,
            vec![comment("1", true), comment("2", false), comment("3", false)],
        );
        let ids: Vec<&str> = r.unresolved_comments().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn blocking() {
        assert!(review(Verdict::RequestChanges, vec![comment("1", false)]).is_blocking());
        assert!(!review(Verdict::RequestChanges, vec![comment("1", true)]).is_blocking());
        assert!(!review(Verdict::RequestChanges, vec![]).is_blocking());
        assert!(!review(Verdict::Comment, vec![comment("1", false)]).is_blocking());
        assert!(!review(Verdict::Approve, vec![comment("1", false)]).is_blocking());
    }

    #[test]
    fn parse_review_json() {
        let json = r#"{
            "id": "review-001",
            "branch": "feature/add-loyalty-tier",
            "revision": 1,
            "actor": "schema-agent",
            "verdict": "request_changes",
            "comments": [
                {"id": "c1", "file": "schemas/sale.json", "line": 12, "body": "do not remove", "resolved": false},
                {"id": "c2", "file": null, "line": null, "body": "nit", "resolved": true}
            ],
            "timestamp": "2026-01-15T10:00:00Z"
        }"#;
        let r = parse_review(json).unwrap();
        assert_eq!(r.verdict, Verdict::RequestChanges);
        assert_eq!(r.comments[0].file.as_deref(), Some("schemas/sale.json"));
        assert_eq!(r.comments[0].line, Some(12));
        assert_eq!(r.comments[1].file, None);
        assert!(r.is_blocking());
    }

    #[test]
    fn parse_rejects_unknown_verdict() {
        let json = r#"{"id": "r", "branch": "b", "revision": 1, "actor": "a",
            "verdict": "maybe", "timestamp": "2026-01-15T10:00:00Z"}"#;
        assert!(matches!(parse_review(json), Err(ReviewError::Parse(_))));
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::RequestChanges.to_string(), "request_changes");
        assert_eq!(Verdict::Approve.to_string(), "approve");
    }
}
