//! Declarative constraint documents.
//!
//! A document lists fields with an optional type, regexes and simple
//! comparison conditions. Compiling it goes through [`ConstraintsBuilder`], so
//! a document and the equivalent builder chain produce the same constraint set.

use crate::{ParserError, Result};
use constraints_core::{ConstraintSet, ConstraintsBuilder, GuardError, ValueKind};
use serde::{Deserialize, Serialize};

/// A constraint file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDocument {
    /// Name of the record type being constrained
    pub name: Option<String>,

    /// Human-readable description
    pub description: Option<String>,

    /// Per-field constraints, in evaluation order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Constraints on a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub field: String,

    /// Expected type; implied `string` when only regexes are given
    #[serde(rename = "type", default)]
    pub kind: Option<ValueKind>,

    /// Patterns the value must match, from its start
    #[serde(default)]
    pub regex: Vec<String>,

    /// Conditions the value must satisfy
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
}

/// A comparison condition, e.g. `{ op: gt, value: 0 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// Operator name
    pub op: String,

    /// Right-hand side of the comparison
    pub value: Operand,
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal; integers are widened
    Number(f64),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            _ => None,
        }
    }

    fn holds<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }
}

impl FieldSpec {
    /// The type this field resolves to.
    pub fn resolved_kind(&self) -> Option<ValueKind> {
        match self.kind {
            Some(kind) => Some(kind),
            None if !self.regex.is_empty() => Some(ValueKind::String),
            None => None,
        }
    }

    fn apply(&self, mut builder: ConstraintsBuilder) -> Result<ConstraintsBuilder> {
        let kind = self.resolved_kind().ok_or_else(|| {
            invalid(&self.field, "a type is required when no regex is given")
        })?;

        if !self.regex.is_empty() && kind != ValueKind::String {
            return Err(invalid(
                &self.field,
                format!("regex constraints require type string, found {}", kind),
            ));
        }
        if kind == ValueKind::String && !self.conditions.is_empty() {
            return Err(invalid(
                &self.field,
                "string fields support regex constraints only",
            ));
        }

        builder = builder.require_type(self.field.as_str(), kind)?;
        for pattern in &self.regex {
            builder = builder.add_regex(self.field.as_str(), pattern)?;
        }
        for condition in &self.conditions {
            builder = condition.apply(&self.field, kind, builder)?;
        }
        Ok(builder)
    }
}

impl ConditionSpec {
    fn apply(
        &self,
        field: &str,
        kind: ValueKind,
        builder: ConstraintsBuilder,
    ) -> Result<ConstraintsBuilder> {
        let unknown = || ParserError::from(GuardError::unknown_rule(field, &self.op));

        let builder = match (kind, self.value) {
            (ValueKind::Numeric, Operand::Number(bound)) => {
                let cmp = Comparison::parse(&self.op).ok_or_else(unknown)?;
                builder.add_value_check(field, move |x| cmp.holds(x, bound))?
            }
            (ValueKind::Boolean, Operand::Bool(expected)) => {
                let cmp = match Comparison::parse(&self.op) {
                    Some(cmp @ (Comparison::Eq | Comparison::Ne)) => cmp,
                    _ => return Err(unknown()),
                };
                builder.add_bool_check(field, move |b| cmp.holds(b, expected))?
            }
            (ValueKind::List, Operand::Number(bound)) => {
                if bound < 0.0 || bound.fract() != 0.0 {
                    return Err(invalid(
                        field,
                        format!(
                            "list length bound must be a non-negative integer, found {}",
                            bound
                        ),
                    ));
                }
                let bound = bound as usize;
                let cmp = match self.op.as_str() {
                    "min_len" => Comparison::Ge,
                    "max_len" => Comparison::Le,
                    "len" => Comparison::Eq,
                    _ => return Err(unknown()),
                };
                builder.add_list_check(field, move |items| cmp.holds(items.len(), bound))?
            }
            (_, _) if !is_known_op(kind, &self.op) => return Err(unknown()),
            (_, operand) => {
                return Err(invalid(
                    field,
                    format!(
                        "operand {} of condition '{}' does not fit type {}",
                        operand, self.op, kind
                    ),
                ));
            }
        };
        Ok(builder)
    }
}

impl ConstraintDocument {
    /// Compiles the document into a constraint set.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed regex, unknown operator or inconsistent
    /// field declaration.
    pub fn to_constraint_set(&self) -> Result<ConstraintSet> {
        let builder = self
            .fields
            .iter()
            .try_fold(ConstraintsBuilder::new(), |builder, spec| spec.apply(builder))?;
        Ok(builder.build())
    }
}

fn is_known_op(kind: ValueKind, op: &str) -> bool {
    match kind {
        ValueKind::Numeric => Comparison::parse(op).is_some(),
        ValueKind::Boolean => matches!(op, "eq" | "ne"),
        ValueKind::List => matches!(op, "min_len" | "max_len" | "len"),
        ValueKind::String => false,
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ParserError {
    ParserError::InvalidConstraint {
        field: field.to_string(),
        message: message.into(),
    }
}
