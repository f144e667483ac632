//! Error types for building constraints and validating records.
//!
//! Field-level problems are never raised one by one: they are collected into
//! an [`ErrorReport`] and surfaced once as [`GuardError::Validation`]. Every
//! other variant is fatal and points at the caller or at the constraint
//! definitions rather than at the data.

use crate::ErrorReport;
use thiserror::Error;

/// Result type for constraint operations.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Main error type for constraint building and record validation.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The record has no fields at all
    #[error("No input data provided")]
    EmptyInput,

    /// A constraint was declared on an empty field name
    #[error("Field name cannot be empty")]
    EmptyFieldName,

    /// A regex pattern failed to compile at declaration time
    #[error("Invalid regex pattern '{pattern}' for field '{field}': {source}")]
    MalformedPattern {
        /// Field the pattern was declared on
        field: String,
        /// The offending pattern
        pattern: String,
        /// Compiler diagnostic
        #[source]
        source: regex::Error,
    },

    /// One or more fields violated their constraints
    #[error("Validation failed: {0}")]
    Validation(ErrorReport),

    /// A caller-supplied predicate failed to evaluate
    #[error("Condition number {index} on field '{field}' could not be evaluated: {message}")]
    PredicateEvaluation {
        /// Field whose condition failed
        field: String,
        /// 1-based position among the field's conditions
        index: usize,
        /// What the predicate reported
        message: String,
    },

    /// A regex rule met a value that is not text
    ///
    /// Only reachable when a field was re-declared with a non-string type
    /// after its regexes were added.
    #[error("Regex number {index} on field '{field}' cannot be applied to a {actual} value")]
    RegexOnNonString {
        /// Field whose regex was skipped
        field: String,
        /// 1-based position among the field's regexes
        index: usize,
        /// Type name of the offending value
        actual: &'static str,
    },

    /// A declarative constraint named a rule the engine does not know
    #[error("Unknown rule kind '{kind}' for field '{field}'")]
    UnknownRuleKind {
        /// Field the rule was declared on
        field: String,
        /// The unrecognized rule name
        kind: String,
    },
}

impl GuardError {
    /// Creates a new unknown rule kind error.
    pub fn unknown_rule(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownRuleKind {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Returns the violation report if this is a validation failure.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            GuardError::Validation(report) => Some(report),
            _ => None,
        }
    }

    /// Consumes the error, returning the violation report if there is one.
    pub fn into_report(self) -> Option<ErrorReport> {
        match self {
            GuardError::Validation(report) => Some(report),
            _ => None,
        }
    }

    /// Whether the caller can recover by rejecting the record and moving on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GuardError::Validation(_))
    }
}

/// Failure reported by a predicate that could not decide.
///
/// Predicates return this instead of `false` when the value they were handed
/// makes the question meaningless (wrong type, NaN, broken invariant).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PredicateFailure(pub String);

impl PredicateFailure {
    /// Creates a new predicate failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
