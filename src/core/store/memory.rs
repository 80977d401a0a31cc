//! core::store::memory
//!
//! In-memory label store for tests and simulation.
//!
//! Single-owner; wrap it in a mutex if several threads need it.

use std::collections::BTreeMap;

use super::{LabelStore, StoreError};
use crate::core::label::Label;
use crate::core::types::BranchName;

/// Label store backed by a map. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryLabelStore {
    labels: BTreeMap<BranchName, Label>,
}

impl MemoryLabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelStore for MemoryLabelStore {
    fn get_label(&self, branch: &BranchName) -> Result<Option<Label>, StoreError> {
        Ok(self.labels.get(branch).copied())
    }

    fn set_label(&mut self, branch: &BranchName, label: Label) -> Result<(), StoreError> {
        self.labels.insert(branch.clone(), label);
        Ok(())
    }

    fn all_labels(&self) -> Result<BTreeMap<BranchName, Label>, StoreError> {
        Ok(self.labels.clone())
    }
}
