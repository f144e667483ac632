//! # Record Constraints Core
//!
//! Core data structures for declaring constraints on loosely-typed records.
//!
//! A record is a flat mapping from field name to [`Value`]. Constraints are
//! declared per field with [`ConstraintsBuilder`] and frozen into an immutable
//! [`ConstraintSet`], which a validator evaluates against any number of records.
//!
//! ## Key Concepts
//!
//! - **Record**: the flat field → value mapping being validated
//! - **ConstraintSet**: the built, shareable collection of per-field rules
//! - **Rule**: one type check, regex match or predicate condition
//! - **ErrorReport**: every violation found in one pass, grouped by field
//!
//! ## Example
//!
//! ```rust
//! use constraints_core::{ConstraintsBuilder, ValueKind};
//!
//! # fn main() -> constraints_core::Result<()> {
//! let constraints = ConstraintsBuilder::new()
//!     .add_regex("name", "^[A-Z][a-z]+$")?
//!     .add_value_check("value", |x| x > 5.0)?
//!     .build();
//!
//! assert_eq!(constraints.get("name").unwrap().kind(), Some(ValueKind::String));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod constraint;
pub mod error;
pub mod report;
pub mod validator;
pub mod value;

pub use builder::*;
pub use constraint::*;
pub use error::*;
pub use report::*;
pub use validator::*;
pub use value::*;
