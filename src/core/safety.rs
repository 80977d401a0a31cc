//! core::safety
//!
//! Schema safety validation for manifests.
//!
//! Schema changes must be additive. Adding fields is always allowed,
//! whatever the declared change type. Removing a field or modifying an
//! existing field's type is a violation.
//!
//! Violations are data, not errors: the caller decides whether they block.

use serde::Serialize;

use super::manifest::Manifest;

/// A rule a schema change can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyRule {
    /// A field was removed.
    FieldRemoval,
    /// A field's type was modified.
    FieldModification,
}

impl SafetyRule {
    /// Human-readable statement of the rule.
    pub fn message(&self) -> &'static str {
        match self {
            SafetyRule::FieldRemoval => "field removal not allowed (deprecate instead)",
            SafetyRule::FieldModification => {
                "field type modification not allowed (add new field instead)"
            }
        }
    }
}

impl std::fmt::Display for SafetyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// One violation of the additive-only rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// Subject the offending change applies to.
    pub subject: String,
    /// Offending field.
    pub field: String,
    pub rule: SafetyRule,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: field {:?} - {}", self.subject, self.field, self.rule)
    }
}

/// Check every schema change in a manifest against the additive-only rule.
///
/// Violations are ordered by schema change, and within one change all
/// removals come before all modifications. An empty result means the
/// manifest is schema-safe.
///
/// # Example
///
/// ```
/// use cindy::core::manifest::{Manifest, SchemaChange, SchemaChangeType};
/// use cindy::core::safety::validate_schema_changes;
///
/// let manifest = Manifest {
///     schema_changes: vec![SchemaChange::additive(
///         "payments.refund.completed",
///         SchemaChangeType::New,
///         ["refund_id", "amount"],
///     )],
///     ..Default::default()
/// };
/// assert!(validate_schema_changes(&manifest).is_empty());
/// ```
pub fn validate_schema_changes(manifest: &Manifest) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    for change in &manifest.schema_changes {
        let removals = change
            .fields_removed
            .iter()
            .map(|f| (f, SafetyRule::FieldRemoval));
        let modifications = change
            .fields_modified
            .iter()
            .map(|f| (f, SafetyRule::FieldModification));

        violations.extend(
            removals
                .chain(modifications)
                .map(|(field, rule)| SchemaViolation {
                    subject: change.subject.clone(),
                    field: field.clone(),
                    rule,
                }),
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{SchemaChange, SchemaChangeType};

    fn manifest(changes: Vec<SchemaChange>) -> Manifest {
        Manifest {
            schema_changes: changes,
            ..Default::default()
        }
    }

    fn change(subject: &str, removed: &[&str], modified: &[&str]) -> SchemaChange {
        SchemaChange {
            subject: subject.into(),
            kind: SchemaChangeType::Extension,
            fields_added: Vec::new(),
            fields_removed: removed.iter().map(|s| s.to_string()).collect(),
            fields_modified: modified.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn additive_extension_is_clean() {
        let m = manifest(vec![SchemaChange::additive(
            "marketing.sale.completed",
            SchemaChangeType::Extension,
            ["loyalty_tier"],
        )]);
        assert!(validate_schema_changes(&m).is_empty());
    }

    #[test]
    fn new_subject_is_clean() {
        let m = manifest(vec![SchemaChange::additive(
            "payments.refund.completed",
            SchemaChangeType::New,
            ["refund_id", "amount", "reason"],
        )]);
        assert!(validate_schema_changes(&m).is_empty());
    }

    #[test]
    fn no_schema_changes_is_clean() {
        assert!(validate_schema_changes(&Manifest::default()).is_empty());
    }

    #[test]
    fn field_removal() {
        let mut c = change("marketing.sale.completed", &["legacy_currency"], &[]);
        c.fields_added = vec!["loyalty_tier".into()];
        let violations = validate_schema_changes(&manifest(vec![c]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "legacy_currency");
        assert_eq!(violations[0].rule, SafetyRule::FieldRemoval);
    }

    #[test]
    fn field_modification() {
        let violations =
            validate_schema_changes(&manifest(vec![change("payments.order", &[], &["amount"])]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "amount");
        assert_eq!(violations[0].rule, SafetyRule::FieldModification);
    }

    #[test]
    fn removals_before_modifications() {
        let manifest = manifest(vec![change("a.b", &["x", "y"], &["z"])]);
        let violations = validate_schema_changes(&manifest);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["x", "y", "z"]);
        assert_eq!(violations[0].rule, SafetyRule::FieldRemoval);
        assert_eq!(violations[1].rule, SafetyRule::FieldRemoval);
        assert_eq!(violations[2].rule, SafetyRule::FieldModification);
    }

    #[test]
    fn manifest_order_preserved_across_changes() {
        let violations = validate_schema_changes(&manifest(vec![
            change("first", &[], &["m1"]),
            change("second", &["r1"], &[]),
        ]));
        let subjects: Vec<&str> = violations.iter().map(|v| v.subject.as_str()).collect();
        assert_eq!(subjects, vec!["first", "second"]);
    }

    #[test]
    fn display() {
        let v = SchemaViolation {
            subject: "a.b".into(),
            field: "x".into(),
            rule: SafetyRule::FieldRemoval,
        };
        assert_eq!(
            v.to_string(),
            "a.b: field \"x\" - field removal not allowed (deprecate instead)"
        );
    }
}
