//! Parser for record constraint files (YAML/TOML formats) and JSON records.
//!
//! This crate reads declarative constraint documents into
//! [`ConstraintDocument`] and compiles them into a
//! [`ConstraintSet`](constraints_core::ConstraintSet). It also reads records
//! from JSON so they can be fed to a validator.
//!
//! # Example
//!
//! ```rust
//! use constraints_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: currency_rates
//! fields:
//!   - field: Date
//!     regex: ['^\d{4}-\d{2}-\d{2}$']
//!   - field: USD
//!     type: numeric
//!     conditions:
//!       - { op: gt, value: 0 }
//! "#;
//!
//! let document = parse_yaml(yaml).expect("Failed to parse constraints");
//! let constraints = document.to_constraint_set().expect("Failed to compile constraints");
//! assert_eq!(constraints.len(), 2);
//! ```

mod document;
mod records;

pub use document::*;
pub use records::*;

use constraints_core::{ConstraintSet, GuardError, Record};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// JSON parsed but does not have the shape of records
    #[error("Invalid record data: {0}")]
    InvalidRecord(String),

    /// A field declaration is inconsistent
    #[error("Invalid constraint for field '{field}': {message}")]
    InvalidConstraint {
        /// Field name
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// The constraint engine rejected a declaration
    #[error(transparent)]
    Constraint(#[from] GuardError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported constraint file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a constraint document from a YAML string.
pub fn parse_yaml(content: &str) -> Result<ConstraintDocument> {
    let document: ConstraintDocument = serde_yaml_ng::from_str(content)?;
    Ok(document)
}

/// Parse a constraint document from a TOML string.
///
/// # Example
///
/// ```rust
/// use constraints_parser::parse_toml;
///
/// let toml = r#"
/// name = "users"
///
/// [[fields]]
/// field = "is_active"
/// type = "boolean"
/// conditions = [{ op = "eq", value = true }]
/// "#;
///
/// let document = parse_toml(toml).unwrap();
/// assert_eq!(document.fields[0].field, "is_active");
/// ```
pub fn parse_toml(content: &str) -> Result<ConstraintDocument> {
    let document: ConstraintDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(document)
}

/// Detect the constraint file format from a path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ConstraintFormat::Yaml`
/// * `.toml` → `ConstraintFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConstraintFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConstraintFormat::Yaml),
        "toml" => Ok(ConstraintFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a constraint document from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<ConstraintDocument> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConstraintFormat::Yaml => parse_yaml(&content),
        ConstraintFormat::Toml => parse_toml(&content),
    }
}

/// Reads and compiles a constraint file in one step.
///
/// ```no_run
/// use constraints_parser::load_constraints;
/// use std::path::Path;
///
/// let constraints = load_constraints(Path::new("constraints/currency_rates.yml")).unwrap();
/// println!("{} constrained fields", constraints.len());
/// ```
pub fn load_constraints(path: &Path) -> Result<ConstraintSet> {
    parse_file(path)?.to_constraint_set()
}

/// Reads records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    parse_records_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use constraints_core::ValueKind;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const CURRENCY_YAML: &str = r#"
name: currency_rates
description: Daily PLN exchange rates
fields:
  - field: Date
    regex:
      - '^\d{4}-\d{2}-\d{2}$'
  - field: USD
    type: numeric
    conditions:
      - { op: gt, value: 0 }
      - { op: lt, value: 100 }
  - field: sources
    type: list
    conditions:
      - { op: min_len, value: 1 }
  - field: verified
    type: boolean
    conditions:
      - { op: eq, value: true }
"#;

    #[test]
    fn test_parse_valid_yaml() {
        let document = parse_yaml(CURRENCY_YAML).expect("Failed to parse valid YAML");

        assert_eq!(document.name, Some("currency_rates".to_string()));
        assert_eq!(document.fields.len(), 4);

        let date = &document.fields[0];
        assert_eq!(date.field, "Date");
        assert_eq!(date.kind, None);
        assert_eq!(date.resolved_kind(), Some(ValueKind::String));
        assert_eq!(date.regex.len(), 1);

        let usd = &document.fields[1];
        assert_eq!(usd.kind, Some(ValueKind::Numeric));
        assert_eq!(usd.conditions[0].op, "gt");
        assert_eq!(usd.conditions[0].value, Operand::Number(0.0));

        let verified = &document.fields[3];
        assert_eq!(verified.conditions[0].value, Operand::Bool(true));
    }

    #[test]
    fn test_compile_yaml() {
        let constraints = parse_yaml(CURRENCY_YAML)
            .unwrap()
            .to_constraint_set()
            .expect("Failed to compile");

        let names: Vec<_> = constraints.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Date", "USD", "sources", "verified"]);
        assert_eq!(constraints.get("USD").unwrap().conditions().len(), 2);
        assert_eq!(
            constraints.get("verified").unwrap().kind(),
            Some(ValueKind::Boolean)
        );
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let invalid_yaml = r#"
fields:
  - field: a
    regex: [unclosed
"#;
        let result = parse_yaml(invalid_yaml);
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_yaml_unknown_type() {
        let yaml = r#"
fields:
  - field: a
    type: decimal
"#;
        assert!(matches!(parse_yaml(yaml).unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_unknown_operator_is_unknown_rule_kind() {
        let yaml = r#"
fields:
  - field: value
    type: numeric
    conditions:
      - { op: between, value: 3 }
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        match err {
            ParserError::Constraint(GuardError::UnknownRuleKind { field, kind }) => {
                assert_eq!(field, "value");
                assert_eq!(kind, "between");
            }
            other => panic!("Expected UnknownRuleKind, got {:?}", other),
        }
    }

    #[test]
    fn test_operator_not_applicable_to_type() {
        let yaml = r#"
fields:
  - field: flag
    type: boolean
    conditions:
      - { op: min_len, value: true }
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        assert!(matches!(
            err,
            ParserError::Constraint(GuardError::UnknownRuleKind { .. })
        ));
    }

    #[test]
    fn test_operand_type_mismatch() {
        let yaml = r#"
fields:
  - field: value
    type: numeric
    conditions:
      - { op: gt, value: true }
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        assert!(matches!(err, ParserError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_malformed_regex_fails_at_load() {
        let yaml = r#"
fields:
  - field: name
    regex: ['[invalid(regex']
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        assert!(matches!(
            err,
            ParserError::Constraint(GuardError::MalformedPattern { .. })
        ));
    }

    #[test]
    fn test_regex_on_non_string_type_rejected() {
        let yaml = r#"
fields:
  - field: value
    type: numeric
    regex: ['^1']
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        assert!(matches!(err, ParserError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_missing_type_rejected() {
        let yaml = r#"
fields:
  - field: value
    conditions:
      - { op: gt, value: 1 }
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        match err {
            ParserError::InvalidConstraint { field, .. } => assert_eq!(field, "value"),
            other => panic!("Expected InvalidConstraint, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_list_bound_rejected() {
        let yaml = r#"
fields:
  - field: tags
    type: list
    conditions:
      - { op: max_len, value: 2.5 }
"#;
        let err = parse_yaml(yaml).unwrap().to_constraint_set().unwrap_err();
        assert!(matches!(err, ParserError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_bare_type_declaration() {
        let yaml = r#"
fields:
  - field: payload
    type: list
"#;
        let constraints = parse_yaml(yaml).unwrap().to_constraint_set().unwrap();
        let payload = constraints.get("payload").unwrap();
        assert_eq!(payload.kind(), Some(ValueKind::List));
        assert_eq!(payload.rule_count(), 1);
    }

    #[test]
    fn test_parse_valid_toml() {
        let toml = r#"
name = "users"

[[fields]]
field = "name"
regex = ["^[A-Z][a-z]+$"]

[[fields]]
field = "age"
type = "numeric"
conditions = [{ op = "ge", value = 18 }, { op = "le", value = 150 }]
"#;

        let document = parse_toml(toml).expect("Failed to parse valid TOML");
        assert_eq!(document.name, Some("users".to_string()));
        assert_eq!(document.fields[1].conditions[0].value, Operand::Number(18.0));

        let constraints = document.to_constraint_set().unwrap();
        assert_eq!(constraints.rule_count(), 5);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid_toml = r#"
name = "test"
[[[invalid syntax
"#;
        let result = parse_toml(invalid_toml);
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_detect_format_yaml() {
        let path = Path::new("constraints.yaml");
        assert_eq!(detect_format(path).unwrap(), ConstraintFormat::Yaml);

        let path = Path::new("constraints.YML");
        assert_eq!(detect_format(path).unwrap(), ConstraintFormat::Yaml);
    }

    #[test]
    fn test_detect_format_toml() {
        let path = Path::new("constraints.toml");
        assert_eq!(detect_format(path).unwrap(), ConstraintFormat::Toml);
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("constraints.json"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("constraints"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_load_constraints_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(CURRENCY_YAML.as_bytes()).unwrap();

        let constraints = load_constraints(file.path()).expect("Failed to load constraints");
        assert_eq!(constraints.len(), 4);
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"Date": "2023-05-01"}, {"Date": "2023-05-02"}]"#)
            .unwrap();

        let records = load_records(file.path()).expect("Failed to load records");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ParserError::IoError(_)));
    }
}
