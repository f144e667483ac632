//! Main validation engine.
//!
//! This module provides the `RecordValidator` that evaluates a built
//! constraint set against records and aggregates every violation it finds.

use crate::{rules, validate_records};
use constraints_core::{
    BatchReport, ConstraintSet, ErrorReport, FieldConstraints, GuardError, Record,
    RecordValidation, Result, Rule, Violation,
};

/// Validation engine for records.
///
/// Holds nothing but the immutable constraint set, so one instance can be
/// shared across threads and reused for any number of records.
///
/// # Example
///
/// ```rust
/// use constraints_core::{record, ConstraintsBuilder, Value};
/// use constraints_validator::RecordValidator;
///
/// # fn main() -> constraints_core::Result<()> {
/// let constraints = ConstraintsBuilder::new()
///     .add_regex("name", "^[A-Z][a-z]+$")?
///     .build();
/// let validator = RecordValidator::new(constraints);
///
/// let good = record([("name", Value::from("Wojtek"))]);
/// assert!(validator.validate(&good).is_ok());
///
/// let bad = record([("name", Value::from("wojtek"))]);
/// let err = validator.validate(&bad).unwrap_err();
/// assert_eq!(err.report().unwrap().messages("name"), vec!["does not match regex number 1"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordValidator {
    constraints: ConstraintSet,
}

impl RecordValidator {
    /// Creates a validator for a built constraint set.
    pub fn new(constraints: ConstraintSet) -> Self {
        Self { constraints }
    }

    /// The constraint set this validator evaluates.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Validates a record against every constrained field.
    ///
    /// Returns the same record on success. Field-level problems are collected
    /// and surfaced together as [`GuardError::Validation`].
    ///
    /// # Errors
    ///
    /// - [`GuardError::EmptyInput`] if the record has no fields
    /// - [`GuardError::Validation`] if any constraint is violated
    /// - [`GuardError::PredicateEvaluation`] if a condition could not be evaluated
    pub fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record> {
        let report = self.validate_report(record)?;
        if report.is_empty() {
            Ok(record)
        } else {
            Err(GuardError::Validation(report))
        }
    }

    /// Runs the same pass as [`validate`](Self::validate) but hands back the
    /// report, empty on success, instead of failing on violations.
    pub fn validate_report(&self, record: &Record) -> Result<ErrorReport> {
        self.run(record)
    }

    /// Validates records one by one, collecting rejections instead of stopping.
    ///
    /// Empty records are reported as failures. Fatal errors (a condition that
    /// could not be evaluated) abort the whole batch. See [`validate_records`]
    /// for the fail-fast variant over any validator.
    pub fn validate_batch<'r, I>(&self, records: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        validate_records(self, records, false)
    }

    fn run(&self, record: &Record) -> Result<ErrorReport> {
        if record.is_empty() {
            return Err(GuardError::EmptyInput);
        }

        let mut report = ErrorReport::new();
        for (field, constraints) in self.constraints.iter() {
            check_field(field, constraints, record, &mut report)?;
        }
        Ok(report)
    }
}

/// Evaluates one field's rules, appending violations to `report`.
fn check_field(
    field: &str,
    constraints: &FieldConstraints,
    record: &Record,
    report: &mut ErrorReport,
) -> Result<()> {
    let Some(value) = record.get(field) else {
        report.push(field, Violation::KeyNotFound);
        return Ok(());
    };

    let mut regex_index = 0;
    let mut condition_index = 0;

    for rule in constraints.rules() {
        match rule {
            Rule::TypeCheck(kind) => {
                if !rules::matches_type(kind, value) {
                    report.push(
                        field,
                        Violation::IncorrectType {
                            expected: kind,
                            actual: value.type_name(),
                        },
                    );
                    // later rules assume the declared type
                    return Ok(());
                }
            }
            Rule::RegexCheck(regex) => {
                regex_index += 1;
                let matched = rules::matches_regex(regex, value).ok_or_else(|| {
                    GuardError::RegexOnNonString {
                        field: field.to_string(),
                        index: regex_index,
                        actual: value.type_name(),
                    }
                })?;
                if !matched {
                    report.push(field, Violation::RegexMismatch { index: regex_index });
                }
            }
            Rule::ConditionCheck(predicate) => {
                condition_index += 1;
                let holds = rules::evaluate_condition(predicate, value).map_err(|failure| {
                    GuardError::PredicateEvaluation {
                        field: field.to_string(),
                        index: condition_index,
                        message: failure.to_string(),
                    }
                })?;
                if !holds {
                    report.push(
                        field,
                        Violation::ConditionFailed {
                            index: condition_index,
                        },
                    );
                }
            }
        }
    }

    Ok(())
}

impl RecordValidation for RecordValidator {
    fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record> {
        RecordValidator::validate(self, record)
    }

    fn name(&self) -> &str {
        "record_validator"
    }
}
