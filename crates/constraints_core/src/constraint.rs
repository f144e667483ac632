//! Constraint model: rules, per-field constraints and the built constraint set.

use crate::{PredicateFailure, Value, ValueKind};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Signature of a condition predicate.
pub type PredicateFn = dyn Fn(&Value) -> Result<bool, PredicateFailure> + Send + Sync;

/// A caller-supplied condition on a field value.
///
/// Cloning is cheap: the closure is shared, never copied.
#[derive(Clone)]
pub struct Predicate {
    func: Arc<PredicateFn>,
    label: Option<String>,
}

impl Predicate {
    /// Wraps a fallible predicate.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, PredicateFailure> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            label: None,
        }
    }

    /// Attaches a human-readable description, shown in debug output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Invokes the predicate.
    pub fn call(&self, value: &Value) -> Result<bool, PredicateFailure> {
        (self.func)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// One declarative check attached to a field, borrowed from its [`FieldConstraints`].
#[derive(Debug, Clone, Copy)]
pub enum Rule<'a> {
    /// Structural type assertion
    TypeCheck(ValueKind),
    /// Text must match the pattern (from its start)
    RegexCheck(&'a Regex),
    /// Arbitrary predicate must hold
    ConditionCheck(&'a Predicate),
}

/// All constraints declared on a single field.
///
/// The type is implicit: every builder call sets it, the last one wins.
/// Regexes and conditions accumulate in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldConstraints {
    kind: Option<ValueKind>,
    regexes: Vec<Regex>,
    conditions: Vec<Predicate>,
}

impl FieldConstraints {
    /// The type the field must hold, if one was declared.
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    /// Regexes in declaration order.
    pub fn regexes(&self) -> &[Regex] {
        &self.regexes
    }

    /// Conditions in declaration order.
    pub fn conditions(&self) -> &[Predicate] {
        &self.conditions
    }

    /// Number of rules, counting the type check.
    pub fn rule_count(&self) -> usize {
        usize::from(self.kind.is_some()) + self.regexes.len() + self.conditions.len()
    }

    /// Rules in evaluation order: type check, then regexes, then conditions.
    pub fn rules(&self) -> impl Iterator<Item = Rule<'_>> {
        self.kind
            .map(Rule::TypeCheck)
            .into_iter()
            .chain(self.regexes.iter().map(Rule::RegexCheck))
            .chain(self.conditions.iter().map(Rule::ConditionCheck))
    }

    pub(crate) fn set_kind(&mut self, kind: ValueKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn push_regex(&mut self, regex: Regex) {
        self.regexes.push(regex);
    }

    pub(crate) fn push_condition(&mut self, predicate: Predicate) {
        self.conditions.push(predicate);
    }
}

/// Immutable, built set of field constraints.
///
/// Fields keep the order in which they were first declared. The set is
/// `Send + Sync` and clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    fields: Arc<IndexMap<String, FieldConstraints>>,
}

impl ConstraintSet {
    pub(crate) fn from_fields(fields: IndexMap<String, FieldConstraints>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Constraints declared on `field`.
    pub fn get(&self, field: &str) -> Option<&FieldConstraints> {
        self.fields.get(field)
    }

    /// Whether `field` is constrained.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of constrained fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, constraints)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConstraints)> {
        self.fields
            .iter()
            .map(|(name, constraints)| (name.as_str(), constraints))
    }

    /// Total number of rules across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.values().map(FieldConstraints::rule_count).sum()
    }
}
