//! # snippet-stats - Descriptive reports over code-snippet datasets
//!
//! Reads a table of code-snippet metadata (one row per snippet, with the
//! generating tool, detection phrase, language, repository and line count),
//! prints descriptive statistics, exports a tool × phrase/language pivot
//! matrix, and writes a copy of the dataset with coding-challenge rows
//! removed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│  Aggregate  │────▶│ Console +    │
//! │  (any enc)  │     │ (calamine / │     │  + Matrix   │     │ matrix JSON  │
//! └─────────────┘     │  auto-enc)  │     └─────────────┘     └──────────────┘
//!                     │             │     ┌─────────────┐     ┌──────────────┐
//!                     │             │────▶│  Challenge  │────▶│ Cleaned CSV  │
//!                     └─────────────┘     │   filter    │     └──────────────┘
//!                                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snippet_stats::{run_clean, Config, ReportPrinter};
//!
//! let config = Config::from_env();
//! let summary = run_clean(&config, &mut ReportPrinter::stdout())?;
//! println!("Removed {} of {} rows", summary.removed, summary.total_rows);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Rows, tables and report records
//! - [`config`] - Paths and keyword configuration
//! - [`logs`] - Console progress lines and tracing setup
//! - [`parser`] - Spreadsheet and CSV loading with auto-detection
//! - [`normalize`] - Field normalization and numeric policies
//! - [`aggregate`] - Frequency, combination and grouped statistics
//! - [`matrix`] - Tool × phrase/language pivot matrix
//! - [`report`] - Console report sections and table rendering
//! - [`filter`] - Coding-challenge row filter
//! - [`export`] - CSV and JSON writers
//! - [`pipeline`] - Reporting and cleaning entry points

// Core modules
pub mod error;
pub mod models;
pub mod config;
pub mod logs;

// Loading
pub mod parser;
pub mod normalize;

// Analysis
pub mod aggregate;
pub mod matrix;
pub mod report;
pub mod filter;

// Output
pub mod export;

// Pipelines
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError, ExportResult, LoadError, LoadResult, PipelineError, PipelineResult, ReportError,
    ReportResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{columns, ComboEntry, FrequencyEntry, GroupStat, Row, Table, TableSource};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::Config;

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use normalize::{normalize, parse_numeric, parse_numeric_or_default, NumericPolicy};
pub use parser::{
    decode_content, detect_delimiter, detect_encoding, load_first_sheet, load_table,
    parse_delimited_bytes,
};

// =============================================================================
// Re-exports - Analysis
// =============================================================================

pub use aggregate::{
    combination_count, count_distinct, frequency_count, grouped_numeric_stats,
    grouped_numeric_stats_with, top_n,
};
pub use filter::{ChallengeFilter, FilterOutcome, KeywordCount, RemovalTally};
pub use matrix::{build_matrix, export_matrix, to_long, LongCell, MatrixFormat, MatrixRow};
pub use report::{build_report, print_report, render_table, ReportOptions, ReportPrinter, ReportSummary};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use export::{headers_for, write_csv, write_csv_to, write_json_pretty, HeaderStrategy};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{load_input, run_clean, run_report, CleanSummary};
