use colored::*;
use constraints_core::{BatchReport, FailureReason};
use serde_json::json;

pub fn print_batch_report(name: &str, report: &BatchReport, format: &str) {
    match format {
        "json" => print_json_report(name, report),
        _ => print_text_report(name, report),
    }
}

fn print_text_report(name: &str, report: &BatchReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  VALIDATION REPORT: {}", name).bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.failures.is_empty() {
        println!("\n{}", "Rejected records:".red().bold());
        for failure in &report.failures {
            match &failure.reason {
                FailureReason::EmptyInput => {
                    println!("  #{} {}", failure.index, "no input data provided".red());
                }
                FailureReason::Violations(violations) => {
                    println!("  #{}", failure.index);
                    for (field, problems) in violations.iter() {
                        let messages: Vec<String> =
                            problems.iter().map(ToString::to_string).collect();
                        println!("    {}: {}", field.bold(), messages.join(", ").red());
                    }
                }
            }
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Records validated: {}", report.stats.records_validated);
    println!("  Records passed:    {}", report.stats.records_passed);
    println!("  Records rejected:  {}", report.failed_count());
    println!("{}", "═".repeat(60));
}

fn print_json_report(name: &str, report: &BatchReport) {
    let rejected: Vec<_> = report
        .failures
        .iter()
        .map(|failure| match &failure.reason {
            FailureReason::EmptyInput => json!({
                "index": failure.index,
                "error": "no input data provided",
            }),
            FailureReason::Violations(violations) => json!({
                "index": failure.index,
                "errors": violations,
            }),
        })
        .collect();

    let output = json!({
        "name": name,
        "passed": report.passed(),
        "rejected": rejected,
        "summary": {
            "records_validated": report.stats.records_validated,
            "records_passed": report.stats.records_passed,
            "records_rejected": report.failed_count(),
            "duration_ms": report.stats.duration_ms,
        }
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(err) => print_error(&format!("Failed to render report: {}", err)),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
