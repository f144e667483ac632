//! Batch validation over any validation boundary.

use constraints_core::{
    BatchReport, FailureReason, GuardError, Record, RecordFailure, RecordValidation, Result,
};
use std::time::Instant;

/// Runs records through `validator` one by one, collecting rejections.
///
/// Empty records and constraint violations become [`RecordFailure`]s; with
/// `fail_fast` the run stops after the first one. Any other error is fatal
/// and aborts the batch.
///
/// Works with wrappers such as [`Observed`](crate::Observed), so every call
/// still goes through their logging.
///
/// # Example
///
/// ```rust
/// use constraints_core::{record, ConstraintsBuilder, Value};
/// use constraints_validator::{validate_records, RecordValidator};
///
/// # fn main() -> constraints_core::Result<()> {
/// let validator = RecordValidator::new(
///     ConstraintsBuilder::new().add_value_check("USD", |x| x > 0.0)?.build(),
/// );
/// let records = vec![
///     record([("USD", Value::Float(-1.0))]),
///     record([("USD", Value::Float(4.17))]),
/// ];
///
/// let batch = validate_records(&validator, &records, true)?;
/// assert_eq!(batch.stats.records_validated, 1);
/// assert_eq!(batch.failures[0].index, 0);
/// # Ok(())
/// # }
/// ```
pub fn validate_records<'r, V, I>(
    validator: &V,
    records: I,
    fail_fast: bool,
) -> Result<BatchReport>
where
    V: RecordValidation + ?Sized,
    I: IntoIterator<Item = &'r Record>,
{
    let start = Instant::now();
    let mut batch = BatchReport::default();

    for (index, record) in records.into_iter().enumerate() {
        batch.stats.records_validated += 1;

        let reason = match validator.validate(record) {
            Ok(_) => {
                batch.stats.records_passed += 1;
                continue;
            }
            Err(GuardError::EmptyInput) => FailureReason::EmptyInput,
            Err(GuardError::Validation(report)) => FailureReason::Violations(report),
            Err(err) => return Err(err),
        };
        batch.failures.push(RecordFailure { index, reason });

        if fail_fast {
            break;
        }
    }

    batch.stats.duration_ms = start.elapsed().as_millis() as u64;
    Ok(batch)
}
