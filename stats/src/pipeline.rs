//! The two entry points: reporting and cleaning.
//!
//! ```text
//! load_table ──▶ build_report ──▶ print_report + matrix JSON     (run_report)
//! load_table ──▶ ChallengeFilter ──▶ summary + cleaned CSV       (run_clean)
//! ```
//!
//! Both are single-pass and hold the whole table in memory. Any load or
//! write failure aborts the run; nothing is retried.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::PipelineResult;
use crate::export::{headers_for, write_csv, HeaderStrategy};
use crate::filter::{KeywordCount, RemovalTally};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::matrix::{export_matrix, MatrixFormat};
use crate::models::Table;
use crate::parser::load_table;
use crate::report::{build_report, print_report, ReportOptions, ReportPrinter, ReportSummary};

/// Load the configured input, logging what was read.
pub fn load_input(path: &Path) -> PipelineResult<Table> {
    log_info(format!("📖 Reading {}", path.display()));
    let table = load_table(path)?;
    log_success(format!("Read {} rows from {}", table.rows.len(), table.source));
    log_info_indent(format!("Columns: {}", table.headers.join(", ")), 1);
    if table.rows.is_empty() {
        log_warning("Input has a header but no data rows");
    }
    Ok(table)
}

// =============================================================================
// Reporting
// =============================================================================

/// Run the reporting pipeline: print every section, then write the matrix.
pub fn run_report<W: Write>(
    config: &Config,
    options: &ReportOptions,
    format: MatrixFormat,
    printer: &mut ReportPrinter<W>,
) -> PipelineResult<ReportSummary> {
    let table = load_input(&config.input_path)?;

    log_info("📊 Computing report...");
    let summary = build_report(&table.rows, options);
    print_report(&summary, options, printer)?;

    export_matrix(&summary.matrix, &config.matrix_path, format)?;
    log_success(format!(
        "Matrix ({} tools) written to {}",
        summary.matrix.len(),
        config.matrix_path.display()
    ));

    Ok(summary)
}

// =============================================================================
// Cleaning
// =============================================================================

/// Outcome of the cleaning pipeline.
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub total_rows: usize,
    pub kept: usize,
    pub removed: usize,
    pub tally: RemovalTally,
    pub output_path: PathBuf,
    /// Header written to the cleaned CSV.
    pub headers: Vec<String>,
}

impl CleanSummary {
    pub fn breakdown(&self) -> Vec<KeywordCount> {
        self.tally.breakdown()
    }
}

/// Run the cleaning pipeline: filter challenge rows and write the rest.
pub fn run_clean<W: Write>(
    config: &Config,
    printer: &mut ReportPrinter<W>,
) -> PipelineResult<CleanSummary> {
    let table = load_input(&config.input_path)?;
    let total_rows = table.rows.len();

    let filter = config.challenge_filter();
    log_info(format!(
        "🧹 Matching {} keywords against: {}",
        filter.keywords().len(),
        filter.text_fields().join(", ")
    ));
    for field in filter.text_fields() {
        if !table.headers.iter().any(|h| h == field) {
            log_warning(format!("Column '{}' not found; treated as empty", field));
        }
    }

    let outcome = filter.apply(table.rows);

    printer.section("Challenge rows removed")?;
    printer.line("Total rows removed", outcome.removed.len())?;
    let breakdown = outcome.tally.breakdown();
    if !breakdown.is_empty() {
        printer.table("Removed per keyword", &breakdown)?;
    }

    let headers = headers_for(&outcome.cleaned, HeaderStrategy::FirstRow, &table.headers);
    let kept = write_csv(&config.output_path, &headers, &outcome.cleaned)?;
    log_success(format!(
        "{} rows kept, written to {}",
        kept,
        config.output_path.display()
    ));

    Ok(CleanSummary {
        total_rows,
        kept,
        removed: outcome.removed.len(),
        tally: outcome.tally,
        output_path: config.output_path.clone(),
        headers,
    })
}
