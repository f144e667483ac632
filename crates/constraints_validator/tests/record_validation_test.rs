//! End-to-end behaviour of the validator on realistic records.
//!
//! Covers the reporting contract: short-circuits on missing fields and type
//! mismatches, 1-based numbering of regex/condition failures, and independence
//! of reports across calls and threads sharing one constraint set.

use constraints_core::{
    record, ConstraintSet, ConstraintsBuilder, GuardError, Record, Value, ValueKind, Violation,
};
use constraints_validator::RecordValidator;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

fn currency_constraints() -> ConstraintSet {
    ConstraintsBuilder::new()
        .add_regex("Date", r"^\d{4}-\d{2}-\d{2}$")
        .unwrap()
        .add_value_check("USD", |x| x > 0.0)
        .unwrap()
        .add_value_check("EUR", |x| x > 0.0)
        .unwrap()
        .add_list_check("sources", |items| !items.is_empty() && items.len() <= 3)
        .unwrap()
        .add_bool_check("verified", |b| b)
        .unwrap()
        .build()
}

fn valid_rate() -> Record {
    record([
        ("Date", Value::from("2023-05-01")),
        ("USD", Value::Float(4.17)),
        ("EUR", Value::Int(5)),
        ("sources", Value::from(vec!["bankier"])),
        ("verified", Value::Bool(true)),
    ])
}

#[test]
fn test_valid_record_passes_untouched() {
    let validator = RecordValidator::new(currency_constraints());
    let input = valid_rate();
    let before = input.clone();

    let output = validator.validate(&input).expect("valid record should pass");

    assert!(std::ptr::eq(output, &input));
    assert_eq!(output, &before);
}

#[test]
fn test_unconstrained_fields_are_ignored() {
    let validator = RecordValidator::new(currency_constraints());
    let mut input = valid_rate();
    input.insert("GBP".to_string(), Value::Null);
    input.insert("note".to_string(), Value::from(vec![Value::Null]));

    assert!(validator.validate(&input).is_ok());
}

#[test]
fn test_every_field_reported_in_one_pass() {
    let validator = RecordValidator::new(currency_constraints());
    let input = record([
        ("Date", Value::from("01.05.2023")),
        ("USD", Value::Float(-1.0)),
        ("EUR", Value::from("5.0")),
        ("sources", Value::List(vec![])),
    ]);

    let err = validator.validate(&input).unwrap_err();
    let report = err.report().expect("expected a violation report");

    assert_eq!(
        report.fields().collect::<Vec<_>>(),
        vec!["Date", "USD", "EUR", "sources", "verified"]
    );
    assert_eq!(report.messages("Date"), vec!["does not match regex number 1"]);
    assert_eq!(report.messages("USD"), vec!["does not match condition number 1"]);
    assert_eq!(report.messages("EUR"), vec!["incorrect type"]);
    assert_eq!(report.messages("sources"), vec!["does not match condition number 1"]);
    assert_eq!(report.messages("verified"), vec!["key not found"]);
    assert_eq!(report.violation_count(), 5);
}

#[test]
fn test_missing_field_reports_only_key_not_found() {
    let constraints = ConstraintsBuilder::new()
        .add_regex("name", "^[A-Z]")
        .unwrap()
        .add_regex("name", "[a-z]$")
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let report = validator
        .validate(&record([("other", Value::Int(1))]))
        .unwrap_err()
        .into_report()
        .unwrap();

    assert_eq!(report.get("name"), Some(&[Violation::KeyNotFound][..]));
}

#[test]
fn test_type_mismatch_skips_regex_and_conditions() {
    let constraints = ConstraintsBuilder::new()
        .add_regex("id", "^x")
        .unwrap()
        .add_condition("id", ValueKind::String, |_| Ok(false))
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let report = validator
        .validate(&record([("id", Value::Int(42))]))
        .unwrap_err()
        .into_report()
        .unwrap();

    assert_eq!(report.messages("id"), vec!["incorrect type"]);
}

#[test]
fn test_boolean_is_not_numeric() {
    let constraints = ConstraintsBuilder::new()
        .add_value_check("count", |x| x >= 0.0)
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let report = validator
        .validate(&record([("count", Value::Bool(true))]))
        .unwrap_err()
        .into_report()
        .unwrap();
    assert_eq!(report.messages("count"), vec!["incorrect type"]);
}

#[test]
fn test_null_value_is_incorrect_type_not_missing() {
    let constraints = ConstraintsBuilder::new()
        .add_regex("name", ".")
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let report = validator
        .validate(&record([("name", Value::Null)]))
        .unwrap_err()
        .into_report()
        .unwrap();
    assert_eq!(report.messages("name"), vec!["incorrect type"]);
}

#[test]
fn test_falsy_values_are_present() {
    let constraints = ConstraintsBuilder::new()
        .add_value_check("zero", |x| x == 0.0)
        .unwrap()
        .add_bool_check("off", |b| !b)
        .unwrap()
        .add_list_check("empty", |items| items.is_empty())
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let input = record([
        ("zero", Value::Int(0)),
        ("off", Value::Bool(false)),
        ("empty", Value::List(vec![])),
    ]);
    assert!(validator.validate(&input).is_ok());
}

#[test]
fn test_regex_name_example() {
    let validator = RecordValidator::new(
        ConstraintsBuilder::new()
            .add_regex("name", "^[A-Z][a-z]+$")
            .unwrap()
            .build(),
    );

    assert!(validator.validate(&record([("name", Value::from("Wojtek"))])).is_ok());

    let report = validator
        .validate(&record([("name", Value::from("wojtek"))]))
        .unwrap_err()
        .into_report()
        .unwrap();
    assert_eq!(report.messages("name"), vec!["does not match regex number 1"]);
}

#[test]
fn test_bool_check_example() {
    let validator = RecordValidator::new(
        ConstraintsBuilder::new()
            .add_bool_check("is_active", |x| !x)
            .unwrap()
            .build(),
    );

    let report = validator
        .validate(&record([("is_active", Value::Bool(true))]))
        .unwrap_err()
        .into_report()
        .unwrap();
    assert_eq!(
        report.messages("is_active"),
        vec!["does not match condition number 1"]
    );
}

#[test]
fn test_empty_input_for_any_constraints() {
    for constraints in [currency_constraints(), ConstraintsBuilder::new().build()] {
        let validator = RecordValidator::new(constraints);
        assert!(matches!(
            validator.validate(&Record::new()),
            Err(GuardError::EmptyInput)
        ));
    }
}

#[test]
fn test_sequential_calls_are_independent() {
    let validator = RecordValidator::new(currency_constraints());

    let mut first = valid_rate();
    first.insert("USD".to_string(), Value::Float(0.0));
    let first_report = validator.validate(&first).unwrap_err().into_report().unwrap();

    let mut second = valid_rate();
    second.remove("verified");
    let second_report = validator.validate(&second).unwrap_err().into_report().unwrap();

    assert_eq!(first_report.fields().collect::<Vec<_>>(), vec!["USD"]);
    assert_eq!(second_report.fields().collect::<Vec<_>>(), vec!["verified"]);
    assert!(validator.validate(&valid_rate()).is_ok());
}

#[test]
fn test_shared_across_threads() {
    let validator = Arc::new(RecordValidator::new(currency_constraints()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let mut input = valid_rate();
                if i % 2 == 1 {
                    input.insert("USD".to_string(), Value::Float(-(i as f64)));
                }
                validator
                    .validate(&input)
                    .err()
                    .and_then(GuardError::into_report)
                    .map(|report| report.fields().map(String::from).collect::<Vec<_>>())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let outcome = handle.join().expect("validation thread panicked");
        if i % 2 == 1 {
            assert_eq!(outcome, Some(vec!["USD".to_string()]));
        } else {
            assert_eq!(outcome, None);
        }
    }
}

#[test]
fn test_regex_on_retyped_field_is_fatal() {
    let constraints = ConstraintsBuilder::new()
        .add_regex("code", "^[0-9]+")
        .unwrap()
        .add_value_check("code", |x| x > 0.0)
        .unwrap()
        .build();
    let validator = RecordValidator::new(constraints);

    let err = validator
        .validate(&record([("code", Value::Int(5))]))
        .unwrap_err();
    assert!(!err.is_recoverable());
    assert!(matches!(
        err,
        GuardError::RegexOnNonString { index: 1, actual: "int64", .. }
    ));
}

#[test]
fn test_dollar_rejects_trailing_newline() {
    let validator = RecordValidator::new(
        ConstraintsBuilder::new()
            .add_regex("year", r"^\d{4}$")
            .unwrap()
            .build(),
    );

    assert!(validator.validate(&record([("year", Value::from("2023"))])).is_ok());

    let report = validator
        .validate(&record([("year", Value::from("2023\n"))]))
        .unwrap_err()
        .into_report()
        .unwrap();
    assert_eq!(report.messages("year"), vec!["does not match regex number 1"]);
}
