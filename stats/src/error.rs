//! Error types for the snippet-stats pipelines.
//!
//! - [`LoadError`] - Reading the input table (spreadsheet or CSV)
//! - [`ExportError`] - Writing the cleaned CSV or the matrix JSON
//! - [`ReportError`] - Rendering console tables
//! - [`PipelineError`] - Top-level errors returned by the two entry points
//!
//! Conversion into [`PipelineError`] is automatic via `From`,
//! so `?` works across the step boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while loading the input table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but holds no usable table.
    #[error("Invalid table in '{}': {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// The workbook could not be decoded.
    #[error("Cannot open workbook '{}': {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    /// Malformed delimited text.
    #[error("Invalid CSV in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Content could not be decoded to text.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl LoadError {
    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing output files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output file could not be created or written.
    #[error("Cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors while rendering a console table.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Column headers come from the first record, so there must be one.
    #[error("Report '{title}' has no records")]
    EmptyRecords { title: String },

    /// Records must serialize to flat objects.
    #[error("Report '{title}' records are not key/value objects")]
    NotATable { title: String },

    /// Serialization failed.
    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Console write failed.
    #[error("Report output error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// Returned by [`crate::pipeline::run_report`] and [`crate::pipeline::run_clean`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Output could not be written.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A report could not be rendered.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for report rendering.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
