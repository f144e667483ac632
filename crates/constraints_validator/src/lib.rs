//! # Record Constraints Validator
//!
//! Evaluation engine for record constraints. This crate provides:
//!
//! - Rule evaluators (type, regex, condition), one pure function per rule kind
//! - `RecordValidator`, which applies a constraint set to records and
//!   aggregates every violation into a single report
//! - `Observed`, a wrapper that times and logs calls to any validator
//! - `validate_records`, the batch loop shared by every validator
//!
//! ## Example
//!
//! ```rust
//! use constraints_core::{record, ConstraintsBuilder, GuardError, Value};
//! use constraints_validator::RecordValidator;
//!
//! # fn main() -> constraints_core::Result<()> {
//! let constraints = ConstraintsBuilder::new()
//!     .add_value_check("value", |x| x > 5.0)?
//!     .add_value_check("value", |x| x <= 10.0)?
//!     .build();
//! let validator = RecordValidator::new(constraints);
//!
//! match validator.validate(&record([("value", Value::Int(11))])) {
//!     Ok(_) => println!("Validation passed!"),
//!     Err(GuardError::Validation(report)) => println!("Validation failed: {}", report),
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod engine;
mod observe;
pub mod rules;

pub use batch::*;
pub use engine::*;
pub use observe::*;
