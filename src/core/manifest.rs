//! core::manifest
//!
//! The change manifest a branch author places in the branch.
//!
//! # Format
//!
//! The manifest is a JSON document, conventionally at
//! `.cindy/manifest.json`:
//!
//! ```json
//! {
//!   "revision": 1,
//!   "responds_to": null,
//!   "subjects_affected": ["marketing.sale.completed"],
//!   "schema_changes": [{
//!     "subject": "marketing.sale.completed",
//!     "type": "extension",
//!     "fields_added": ["loyalty_tier"],
//!     "fields_removed": [],
//!     "fields_modified": []
//!   }],
//!   "consumers": ["aftersales", "analytics"],
//!   "risk_self_assessment": "medium",
//!   "depends_on": [],
//!   "description": "Add loyalty tier"
//! }
//! ```
//!
//! Missing list fields decode as empty lists. Unknown fields are ignored;
//! the manifest is read-only to Cindy and other tooling may extend it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or does not match the schema.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Kind of a declared schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaChangeType {
    /// A brand-new subject.
    New,
    /// An extension of an existing subject.
    Extension,
}

/// One declared modification to one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaChange {
    pub subject: String,

    #[serde(rename = "type")]
    pub kind: SchemaChangeType,

    #[serde(default)]
    pub fields_added: Vec<String>,

    #[serde(default)]
    pub fields_removed: Vec<String>,

    #[serde(default)]
    pub fields_modified: Vec<String>,
}

impl SchemaChange {
    /// A change that only adds fields.
    pub fn additive(
        subject: impl Into<String>,
        kind: SchemaChangeType,
        fields_added: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            kind,
            fields_added: fields_added.into_iter().map(Into::into).collect(),
            fields_removed: Vec::new(),
            fields_modified: Vec::new(),
        }
    }
}

/// A branch's declared description of the change it introduces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Monotonically increasing revision number.
    #[serde(default)]
    pub revision: u32,

    /// Review this revision responds to, if any.
    #[serde(default)]
    pub responds_to: Option<String>,

    #[serde(default)]
    pub subjects_affected: Vec<String>,

    #[serde(default)]
    pub schema_changes: Vec<SchemaChange>,

    #[serde(default)]
    pub consumers: Vec<String>,

    #[serde(default)]
    pub risk_self_assessment: String,

    /// Branches this change depends on.
    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub description: String,
}

impl Manifest {
    /// Check whether the manifest declares any schema changes.
    pub fn has_schema_changes(&self) -> bool {
        !self.schema_changes.is_empty()
    }

    /// Check whether the manifest declares dependencies on other branches.
    pub fn has_dependencies(&self) -> bool {
        !self.depends_on.is_empty()
    }
}

/// Parse a manifest from JSON text.
pub fn parse_manifest(json: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&contents)
}
