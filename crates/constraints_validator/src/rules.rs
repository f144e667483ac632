//! Rule evaluators.
//!
//! One pure function per rule kind. They decide pass/fail for a single value
//! and know nothing about fields, reports or ordering.

use constraints_core::{Predicate, PredicateFailure, Value, ValueKind};
use regex::Regex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Checks a value against the declared type.
///
/// Numeric accepts integers and floats; booleans are never numeric.
/// `Null` and nested maps match no kind.
pub fn matches_type(kind: ValueKind, value: &Value) -> bool {
    value.kind() == Some(kind)
}

/// Checks a string value against a pattern, anchored at the start of the text.
///
/// Returns `None` for a non-string value: callers gate on the type check
/// first, so reaching a regex with anything else is a broken constraint set,
/// not bad data.
///
/// `$` only matches at the very end of the text. A trailing newline is not
/// skipped, so `^\d{4}$` rejects `"2023\n"`; write `^\d{4}\n?$` to accept it.
pub fn matches_regex(regex: &Regex, value: &Value) -> Option<bool> {
    // leftmost match starts at 0 iff some match starts at 0
    value
        .as_str()
        .map(|text| regex.find(text).is_some_and(|m| m.start() == 0))
}

/// Runs a caller-supplied predicate.
///
/// Errors returned by the predicate and panics raised inside it both come
/// back as a [`PredicateFailure`]; neither is treated as a plain `false`.
pub fn evaluate_condition(predicate: &Predicate, value: &Value) -> Result<bool, PredicateFailure> {
    panic::catch_unwind(AssertUnwindSafe(|| predicate.call(value)))
        .unwrap_or_else(|payload| Err(PredicateFailure::new(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("predicate panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("predicate panicked: {}", s)
    } else {
        "predicate panicked".to_string()
    }
}
