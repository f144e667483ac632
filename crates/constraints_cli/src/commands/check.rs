use anyhow::{Context, Result};
use constraints_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(constraints_path: &str, format: &str) -> Result<()> {
    info!("Checking constraints file: {}", constraints_path);

    let document = parse_file(Path::new(constraints_path))
        .with_context(|| format!("Failed to parse constraints file: {}", constraints_path))?;

    // Compiling catches bad regexes and unknown operators
    let constraints = document
        .to_constraint_set()
        .with_context(|| format!("Invalid constraints in {}", constraints_path))?;

    if format == "json" {
        let text = serde_json::to_string_pretty(&document)
            .context("Failed to serialize constraints")?;
        println!("{}", text);
        return Ok(());
    }

    output::print_success("Constraints are valid");

    println!("\nConstraints Summary:");
    println!("  Name:        {}", document.name.as_deref().unwrap_or("N/A"));
    println!(
        "  Description: {}",
        document.description.as_deref().unwrap_or("N/A")
    );
    println!("  Fields:      {}", constraints.len());
    println!("  Rules:       {}", constraints.rule_count());

    if !document.fields.is_empty() {
        println!("\nFields:");
        for spec in &document.fields {
            let kind = spec
                .resolved_kind()
                .map_or_else(|| "?".to_string(), |kind| kind.to_string());
            let mut details = Vec::new();
            if !spec.regex.is_empty() {
                details.push(format!("{} regex", spec.regex.len()));
            }
            for condition in &spec.conditions {
                details.push(format!("{} {}", condition.op, condition.value));
            }
            if details.is_empty() {
                println!("  {:<16} {}", spec.field, kind);
            } else {
                println!("  {:<16} {:<8} {}", spec.field, kind, details.join(", "));
            }
        }
    }

    Ok(())
}
