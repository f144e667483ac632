//! The validation boundary shared by validators and their observers.

use crate::{ErrorReport, Record, Result};

/// Core trait for validating records.
///
/// This is the single callable boundary of the engine: wrappers that time,
/// log or count calls implement it by delegating to an inner validator, so
/// the engine itself never has to know about them.
///
/// # Example
///
/// ```rust
/// use constraints_core::{Record, RecordValidation, Result};
///
/// struct AcceptAll;
///
/// impl RecordValidation for AcceptAll {
///     fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record> {
///         Ok(record)
///     }
/// }
/// ```
pub trait RecordValidation: Send + Sync {
    /// Validates a record, returning it untouched on success.
    fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record>;

    /// Name used when reporting on calls to this validator.
    fn name(&self) -> &str {
        "validate"
    }
}

impl<V: RecordValidation + ?Sized> RecordValidation for &V {
    fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record> {
        (**self).validate(record)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Why a record in a batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The record had no fields
    EmptyInput,
    /// The record violated its constraints
    Violations(ErrorReport),
}

/// A rejected record within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the record in the batch (0-based)
    pub index: usize,
    /// What was wrong with it
    pub reason: FailureReason,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationStats {
    /// Number of records validated
    pub records_validated: usize,

    /// Number of records that satisfied every constraint
    pub records_passed: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

/// Outcome of validating many records with one constraint set.
///
/// Rejected records are listed individually. Unless the run was fail-fast,
/// every record was visited.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Rejected records, in batch order
    pub failures: Vec<RecordFailure>,

    /// Validation statistics
    pub stats: ValidationStats,
}

impl BatchReport {
    /// Whether every record passed.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of rejected records.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}
