//! engine::advance
//!
//! Moving a branch from its current label to a new one.
//!
//! ```text
//! read current label -> check legality -> evaluate gates -> set label
//! ```
//!
//! A branch with no label may only enter the pipeline at `Ready`.

use thiserror::Error;

use super::gate::{self, GateReport};
use crate::core::label::Label;
use crate::core::manifest::Manifest;
use crate::core::review::Review;
use crate::core::store::{LabelStore, StoreError};
use crate::core::types::BranchName;

/// Label a branch enters the pipeline with.
pub const ENTRY_LABEL: Label = Label::Ready;

/// Errors from advancing a branch.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The transition table does not allow the move.
    #[error("{branch}: cannot move from {} to {to}", display_from(.from))]
    Illegal {
        branch: BranchName,
        from: Option<Label>,
        to: Label,
    },

    /// A gate blocks the move.
    #[error("transition blocked: {0}")]
    Gated(GateReport),

    /// Reading or writing the label failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn display_from(from: &Option<Label>) -> String {
    match from {
        Some(label) => label.to_string(),
        None => "(unlabeled)".to_string(),
    }
}

/// A requested label change and the evidence for its gates.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRequest<'a> {
    pub branch: &'a BranchName,
    pub to: Label,
    /// The branch's manifest, when one exists.
    pub manifest: Option<&'a Manifest>,
    /// Reviews of the branch's current revision.
    pub reviews: &'a [Review],
}

impl<'a> TransitionRequest<'a> {
    /// A request without manifest or reviews.
    pub fn new(branch: &'a BranchName, to: Label) -> Self {
        Self {
            branch,
            to,
            manifest: None,
            reviews: &[],
        }
    }

    pub fn with_manifest(mut self, manifest: &'a Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_reviews(mut self, reviews: &'a [Review]) -> Self {
        self.reviews = reviews;
        self
    }
}

/// A completed label change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub branch: BranchName,
    pub from: Option<Label>,
    pub to: Label,
}

/// Check whether `to` may follow `from`, treating `None` as unlabeled.
pub fn is_legal(from: Option<Label>, to: Label) -> bool {
    match from {
        Some(from) => from.can_transition(to),
        None => to == ENTRY_LABEL,
    }
}

/// Move a branch to a new label if the move is legal and no gate blocks it.
///
/// # Errors
///
/// - [`TransitionError::Illegal`] if the transition table forbids the move
/// - [`TransitionError::Gated`] if the move is gated and a gate is not clear
/// - [`TransitionError::Store`] if reading or writing the label fails
///
/// # Example
///
/// ```
/// use cindy::core::label::Label;
/// use cindy::core::store::{LabelStore, MemoryLabelStore};
/// use cindy::core::types::BranchName;
/// use cindy::engine::{advance, TransitionRequest};
///
/// let mut store = MemoryLabelStore::new();
/// let branch = BranchName::new("feature/foo").unwrap();
///
/// advance(&mut store, TransitionRequest::new(&branch, Label::Ready)).unwrap();
/// advance(&mut store, TransitionRequest::new(&branch, Label::Analyzing)).unwrap();
/// assert!(advance(&mut store, TransitionRequest::new(&branch, Label::Deployed)).is_err());
/// ```
pub fn advance<S: LabelStore + ?Sized>(
    store: &mut S,
    request: TransitionRequest<'_>,
) -> Result<Advance, TransitionError> {
    let from = store.get_label(request.branch)?;

    if !is_legal(from, request.to) {
        return Err(TransitionError::Illegal {
            branch: request.branch.clone(),
            from,
            to: request.to,
        });
    }

    let report = gate::evaluate(request.to, request.manifest, request.reviews);
    if !report.is_clear() {
        return Err(TransitionError::Gated(report));
    }

    store.set_label(request.branch, request.to)?;
    tracing::debug!(
        branch = %request.branch,
        from = %display_from(&from),
        to = %request.to,
        "advanced"
    );

    Ok(Advance {
        branch: request.branch.clone(),
        from,
        to: request.to,
    })
}
