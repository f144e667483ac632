//! Timing and logging around a validation boundary.

use chrono::Utc;
use constraints_core::{Record, RecordValidation, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{error, info, warn};

/// Wraps a validator, timing every call and emitting one `tracing` event per call.
///
/// Successful calls log at `INFO`, rejected records at `WARN` and fatal
/// errors at `ERROR`. The inner validator is untouched: results pass through
/// as they are.
///
/// # Example
///
/// ```rust
/// use constraints_core::{record, ConstraintsBuilder, RecordValidation, Value};
/// use constraints_validator::{Observed, RecordValidator};
///
/// # fn main() -> constraints_core::Result<()> {
/// let constraints = ConstraintsBuilder::new().add_bool_check("ok", |b| b)?.build();
/// let observed = Observed::new(RecordValidator::new(constraints)).with_operation("ingest");
///
/// let r = record([("ok", Value::Bool(false))]);
/// assert!(observed.validate(&r).is_err());
/// assert_eq!(observed.failures(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Observed<V> {
    inner: V,
    operation: String,
    calls: AtomicU64,
    failures: AtomicU64,
}

impl<V: RecordValidation> Observed<V> {
    /// Wraps `inner`, naming log events after it.
    pub fn new(inner: V) -> Self {
        let operation = inner.name().to_string();
        Self {
            inner,
            operation,
            calls: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Overrides the operation name used in log events.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Number of calls so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Number of calls that returned an error.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl<V: RecordValidation> RecordValidation for Observed<V> {
    fn validate<'r>(&self, record: &'r Record) -> Result<&'r Record> {
        let started_at = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let start = Instant::now();
        let result = self.inner.validate(record);
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.calls.fetch_add(1, Ordering::Relaxed);
        match &result {
            Ok(_) => info!(
                operation = %self.operation,
                %started_at,
                success = true,
                duration_ms,
                "record validated"
            ),
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                if err.is_recoverable() {
                    warn!(
                        operation = %self.operation,
                        %started_at,
                        success = false,
                        duration_ms,
                        error = %err,
                        "record rejected"
                    );
                } else {
                    error!(
                        operation = %self.operation,
                        %started_at,
                        success = false,
                        duration_ms,
                        error = %err,
                        "validation aborted"
                    );
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.operation
    }
}
