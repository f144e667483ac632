use anyhow::{Context, Result};
use constraints_parser::{load_records, parse_file};
use constraints_validator::{validate_records, Observed, RecordValidator};
use std::path::Path;
use tracing::{debug, info};

use crate::output;

pub fn execute(
    constraints_path: &str,
    records_path: &str,
    format: &str,
    fail_fast: bool,
) -> Result<()> {
    info!("Validating records: {}", records_path);
    info!("Constraints: {}", constraints_path);
    info!("Fail fast: {}", fail_fast);

    let document = parse_file(Path::new(constraints_path))
        .with_context(|| format!("Failed to parse constraints file: {}", constraints_path))?;
    let constraints = document
        .to_constraint_set()
        .with_context(|| format!("Invalid constraints in {}", constraints_path))?;

    let name = document.name.as_deref().unwrap_or("records");
    if format != "json" {
        output::print_info(&format!(
            "Constraints loaded: {} ({} fields, {} rules)",
            name,
            constraints.len(),
            constraints.rule_count()
        ));
    }

    let records = load_records(Path::new(records_path))
        .with_context(|| format!("Failed to read records file: {}", records_path))?;
    debug!("Loaded {} records", records.len());

    let validator = Observed::new(RecordValidator::new(constraints)).with_operation(name);
    let report = validate_records(&validator, &records, fail_fast)
        .with_context(|| format!("Validation aborted in {}", records_path))?;
    info!(
        "Validated {} records in {}ms ({} calls, {} rejected)",
        report.stats.records_validated,
        report.stats.duration_ms,
        validator.calls(),
        validator.failures()
    );

    output::print_batch_report(name, &report, format);

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}
