//! Fluent builder for constraint sets.
//!
//! Every `add_*` call sets the field's expected type (the last one wins) and
//! appends its rule after any rules already declared on that field. Calls
//! return `Result<Self>` so malformed input is rejected where it is written and
//! chains stay readable with `?`.

use crate::{
    ConstraintSet, FieldConstraints, GuardError, Predicate, PredicateFailure, Result, Value,
    ValueKind,
};
use indexmap::IndexMap;
use regex::Regex;

/// Builder for creating a [`ConstraintSet`].
///
/// # Example
///
/// ```rust
/// use constraints_core::ConstraintsBuilder;
///
/// # fn main() -> constraints_core::Result<()> {
/// let constraints = ConstraintsBuilder::new()
///     .add_regex("name", "^[A-Z][a-z]+$")?
///     .add_value_check("value", |x| x > 5.0)?
///     .add_value_check("value", |x| x <= 10.0)?
///     .add_list_check("tags", |items| !items.is_empty())?
///     .add_bool_check("is_active", |b| b)?
///     .build();
///
/// assert_eq!(constraints.len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConstraintsBuilder {
    fields: IndexMap<String, FieldConstraints>,
}

impl ConstraintsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the field's expected type without adding any further rule.
    pub fn require_type(mut self, field: impl Into<String>, kind: ValueKind) -> Result<Self> {
        self.field_mut(field.into(), kind)?;
        Ok(self)
    }

    /// Requires the field to be a string matching `pattern`.
    ///
    /// Matching is anchored at the start of the text. Fails with
    /// [`GuardError::MalformedPattern`] if the pattern does not compile.
    pub fn add_regex(mut self, field: impl Into<String>, pattern: &str) -> Result<Self> {
        let field = field.into();
        let regex = Regex::new(pattern).map_err(|source| GuardError::MalformedPattern {
            field: field.clone(),
            pattern: pattern.to_string(),
            source,
        })?;
        self.field_mut(field, ValueKind::String)?.push_regex(regex);
        Ok(self)
    }

    /// Requires the field to be numeric and to satisfy `condition`.
    ///
    /// Integers are handed to the closure as `f64`.
    pub fn add_value_check<F>(self, field: impl Into<String>, condition: F) -> Result<Self>
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.add_condition(field, ValueKind::Numeric, move |value: &Value| {
            value
                .as_float()
                .map(&condition)
                .ok_or_else(|| wrong_type(ValueKind::Numeric, value))
        })
    }

    /// Requires the field to be a list and to satisfy `condition`.
    pub fn add_list_check<F>(self, field: impl Into<String>, condition: F) -> Result<Self>
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.add_condition(field, ValueKind::List, move |value: &Value| {
            value
                .as_list()
                .map(&condition)
                .ok_or_else(|| wrong_type(ValueKind::List, value))
        })
    }

    /// Requires the field to be a boolean and to satisfy `condition`.
    pub fn add_bool_check<F>(self, field: impl Into<String>, condition: F) -> Result<Self>
    where
        F: Fn(bool) -> bool + Send + Sync + 'static,
    {
        self.add_condition(field, ValueKind::Boolean, move |value: &Value| {
            value
                .as_bool()
                .map(&condition)
                .ok_or_else(|| wrong_type(ValueKind::Boolean, value))
        })
    }

    /// Requires the field to hold `kind` and to satisfy a fallible condition.
    ///
    /// Returning `Err` from the closure aborts validation with
    /// [`GuardError::PredicateEvaluation`] instead of counting as a failed check.
    pub fn add_condition<F>(
        self,
        field: impl Into<String>,
        kind: ValueKind,
        condition: F,
    ) -> Result<Self>
    where
        F: Fn(&Value) -> std::result::Result<bool, PredicateFailure> + Send + Sync + 'static,
    {
        self.add_predicate(field, kind, Predicate::new(condition))
    }

    /// Same as [`add_condition`](Self::add_condition) for an already wrapped predicate.
    pub fn add_predicate(
        mut self,
        field: impl Into<String>,
        kind: ValueKind,
        predicate: Predicate,
    ) -> Result<Self> {
        self.field_mut(field.into(), kind)?.push_condition(predicate);
        Ok(self)
    }

    /// Returns a snapshot of the constraints declared so far.
    ///
    /// The snapshot is independent of the builder: rules added afterwards do
    /// not show up in previously built sets.
    pub fn build(&self) -> ConstraintSet {
        ConstraintSet::from_fields(self.fields.clone())
    }

    fn field_mut(&mut self, field: String, kind: ValueKind) -> Result<&mut FieldConstraints> {
        if field.is_empty() {
            return Err(GuardError::EmptyFieldName);
        }
        let constraints = self.fields.entry(field).or_default();
        constraints.set_kind(kind);
        Ok(constraints)
    }
}

fn wrong_type(expected: ValueKind, value: &Value) -> PredicateFailure {
    PredicateFailure::new(format!(
        "{} condition received a {} value",
        expected,
        value.type_name()
    ))
}
