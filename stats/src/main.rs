//! snippet-stats CLI - Reports and challenge cleaning for code-snippet datasets
//!
//! # Main Commands
//!
//! ```bash
//! snippet-stats report                      # Console report + matrix_output.json
//! snippet-stats report data.csv --long      # Long-format matrix
//! snippet-stats clean                       # Drop coding-challenge rows
//! snippet-stats clean -k kata -o out.csv    # Custom keywords and output
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! snippet-stats parse data.xlsx             # Dump loaded rows as JSON
//! snippet-stats keywords                    # Show the challenge keywords in use
//! ```
//!
//! Paths and keywords default to the environment (`INPUT_PATH`, `OUTPUT_PATH`,
//! `MATRIX_PATH`, `CHALLENGE_KEYWORDS`, `CHALLENGE_FIELDS`, `.env` honored);
//! flags override it.

use clap::{Parser, Subcommand};
use snippet_stats::logs::{init_tracing, log_error, log_info, log_success};
use snippet_stats::{
    load_input, run_clean, run_report, Config, MatrixFormat, NumericPolicy, ReportOptions,
    ReportPrinter,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snippet-stats")]
#[command(about = "Descriptive reports and challenge-site cleaning for code-snippet datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the descriptive report and export the pivot matrix
    Report {
        /// Input spreadsheet or CSV (default: INPUT_PATH or ai_code_dataset.xlsx)
        input: Option<PathBuf>,

        /// Matrix JSON output (default: MATRIX_PATH or matrix_output.json)
        #[arg(short, long)]
        matrix: Option<PathBuf>,

        /// Write the matrix as one record per non-zero cell
        #[arg(long)]
        long: bool,

        /// Number of repositories in the top table
        #[arg(long, default_value = "10")]
        top: usize,

        /// Column summarized per tool
        #[arg(long, default_value = "loc")]
        numeric_field: String,

        /// Leave rows with a non-numeric value out of the statistics
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Remove coding-challenge rows and write the rest as CSV
    Clean {
        /// Input spreadsheet or CSV (default: INPUT_PATH or ai_code_dataset.xlsx)
        input: Option<PathBuf>,

        /// Cleaned CSV output (default: OUTPUT_PATH or ai_code_dataset_no_challenges.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Challenge keyword, repeatable (replaces the configured list)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Column to search, repeatable (default: snippet and repo)
        #[arg(long = "field")]
        fields: Vec<String>,
    },

    /// Load a table and output its rows as JSON
    Parse {
        /// Input spreadsheet or CSV
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the challenge keywords `clean` would use
    Keywords,
}

fn main() {
    init_tracing();
    let config = Config::from_env();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            input,
            matrix,
            long,
            top,
            numeric_field,
            skip_invalid,
        } => {
            let config = Config {
                input_path: input.unwrap_or(config.input_path),
                matrix_path: matrix.unwrap_or(config.matrix_path),
                ..config
            };
            let options = ReportOptions {
                top_repos: top,
                numeric_field,
                numeric_policy: if skip_invalid {
                    NumericPolicy::SkipRow
                } else {
                    NumericPolicy::DefaultZero
                },
            };
            let format = if long { MatrixFormat::Long } else { MatrixFormat::Wide };
            cmd_report(&config, &options, format)
        }

        Commands::Clean {
            input,
            output,
            keywords,
            fields,
        } => {
            let mut config = Config {
                input_path: input.unwrap_or(config.input_path),
                output_path: output.unwrap_or(config.output_path),
                ..config
            };
            if !keywords.is_empty() {
                config.keywords = keywords;
            }
            if !fields.is_empty() {
                config.text_fields = fields;
            }
            cmd_clean(&config)
        }

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Keywords => cmd_keywords(&config),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_report(
    config: &Config,
    options: &ReportOptions,
    format: MatrixFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = run_report(config, options, format, &mut ReportPrinter::stdout())?;
    eprintln!("\n✨ Done! {} rows reported", summary.total_rows);
    Ok(())
}

fn cmd_clean(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let summary = run_clean(config, &mut ReportPrinter::stdout())?;

    log_info(format!(
        "{} of {} rows removed, {} kept",
        summary.removed, summary.total_rows, summary.kept
    ));
    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_input(input)?;
    log_success(format!("Parsed {} records", table.rows.len()));

    let json = serde_json::to_string_pretty(&table.rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_keywords(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    for keyword in config.challenge_filter().keywords() {
        println!("{}", keyword);
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
