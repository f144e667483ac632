//! Per-field violation reports.

use crate::ValueKind;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single constraint violation on one field.
///
/// The `Display` form is the stable, user-facing description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The constrained field is absent from the record
    KeyNotFound,
    /// The field holds a value of the wrong type
    IncorrectType {
        /// Type the constraints require
        expected: ValueKind,
        /// Type name of the value found
        actual: &'static str,
    },
    /// The `index`-th (1-based) regex of the field did not match
    RegexMismatch { index: usize },
    /// The `index`-th (1-based) condition of the field did not hold
    ConditionFailed { index: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::KeyNotFound => f.write_str("key not found"),
            Violation::IncorrectType { .. } => f.write_str("incorrect type"),
            Violation::RegexMismatch { index } => {
                write!(f, "does not match regex number {}", index)
            }
            Violation::ConditionFailed { index } => {
                write!(f, "does not match condition number {}", index)
            }
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Violations found by one validation pass, grouped by field.
///
/// Fields appear in the order the constraint set declares them; violations
/// within a field appear in evaluation order. An empty report means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: IndexMap<String, Vec<Violation>>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for a field.
    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        self.entries.entry(field.into()).or_default().push(violation);
    }

    /// Returns true if no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of violations across all fields.
    pub fn violation_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Violations recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[Violation]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    /// Violation descriptions recorded for `field`.
    pub fn messages(&self, field: &str) -> Vec<String> {
        self.get(field)
            .map(|violations| violations.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Names of the fields that failed, in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(field, violations)` in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.entries
            .iter()
            .map(|(field, violations)| (field.as_str(), violations.as_slice()))
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, violations)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: ", field)?;
            for (j, violation) in violations.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", violation)?;
            }
        }
        Ok(())
    }
}
