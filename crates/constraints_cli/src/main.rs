mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rcheck")]
#[command(version, about = "Validate records against declarative constraints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate records against a constraints file
    Validate {
        /// Path to the constraints file (YAML or TOML)
        constraints: String,

        /// Path to the records file (JSON object or array of objects)
        records: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Stop at the first rejected record
        #[arg(long)]
        fail_fast: bool,
    },

    /// Check a constraints file without validating data
    Check {
        /// Path to the constraints file (YAML or TOML)
        constraints: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            constraints,
            records,
            format,
            fail_fast,
        } => commands::validate::execute(&constraints, &records, &format, fail_fast),

        Commands::Check {
            constraints,
            format,
        } => commands::check::execute(&constraints, &format),
    }
}
