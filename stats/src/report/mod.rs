//! Reporting pipeline: the nine console sections and their data.
//!
//! [`build_report`] computes every metric into a [`ReportSummary`];
//! [`print_report`] renders it section by section, skipping tables whose
//! record set is empty.

pub mod printer;

use std::io::Write;

use crate::aggregate::{
    combination_count, count_distinct, frequency_count, grouped_numeric_stats_with, top_n,
};
use crate::error::ReportResult;
use crate::matrix::{build_matrix, MatrixRow};
use crate::models::{columns, ComboEntry, FrequencyEntry, GroupStat, Row};
use crate::normalize::NumericPolicy;

pub use printer::{render_table, ReportPrinter};

/// Knobs of the reporting pipeline.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Size of the top-repositories table.
    pub top_repos: usize,
    /// Column summarized per tool.
    pub numeric_field: String,
    pub numeric_policy: NumericPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_repos: 10,
            numeric_field: columns::LOC.to_string(),
            numeric_policy: NumericPolicy::DefaultZero,
        }
    }
}

/// Every metric of the report.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub total_rows: usize,
    pub tool_frequency: Vec<FrequencyEntry>,
    pub phrase_frequency: Vec<FrequencyEntry>,
    pub lang_frequency: Vec<FrequencyEntry>,
    pub unique_repos: usize,
    pub top_repos: Vec<FrequencyEntry>,
    pub numeric_by_tool: Vec<GroupStat>,
    pub tool_lang: Vec<ComboEntry>,
    pub tool_phrase: Vec<ComboEntry>,
    pub lang_phrase: Vec<ComboEntry>,
    pub matrix: Vec<MatrixRow>,
}

/// Compute all report metrics over `rows`.
pub fn build_report(rows: &[Row], options: &ReportOptions) -> ReportSummary {
    ReportSummary {
        total_rows: rows.len(),
        tool_frequency: frequency_count(rows, columns::TOOL),
        phrase_frequency: frequency_count(rows, columns::PHRASE),
        lang_frequency: frequency_count(rows, columns::LANG),
        unique_repos: count_distinct(rows, columns::REPO),
        top_repos: top_n(rows, columns::REPO, options.top_repos),
        numeric_by_tool: grouped_numeric_stats_with(
            rows,
            columns::TOOL,
            &options.numeric_field,
            options.numeric_policy,
        ),
        tool_lang: combination_count(rows, columns::TOOL, columns::LANG),
        tool_phrase: combination_count(rows, columns::TOOL, columns::PHRASE),
        lang_phrase: combination_count(rows, columns::LANG, columns::PHRASE),
        matrix: build_matrix(rows),
    }
}

/// Print a table, or a placeholder line when there is nothing to show.
fn table_or_empty<W: Write, T: serde::Serialize>(
    printer: &mut ReportPrinter<W>,
    title: &str,
    records: &[T],
) -> ReportResult<()> {
    if records.is_empty() {
        printer.section(title)?;
        return printer.line("rows", 0);
    }
    printer.table(title, records)
}

/// Render every section of `summary`.
pub fn print_report<W: Write>(
    summary: &ReportSummary,
    options: &ReportOptions,
    printer: &mut ReportPrinter<W>,
) -> ReportResult<()> {
    table_or_empty(printer, "Tool frequency", &summary.tool_frequency)?;
    table_or_empty(printer, "Phrase frequency", &summary.phrase_frequency)?;
    table_or_empty(printer, "Language frequency", &summary.lang_frequency)?;

    printer.section("Unique repositories")?;
    printer.line("Unique repositories", summary.unique_repos)?;

    table_or_empty(
        printer,
        &format!("Top {} repositories by row count", options.top_repos),
        &summary.top_repos,
    )?;
    table_or_empty(
        printer,
        &format!("{} statistics per tool", options.numeric_field.to_uppercase()),
        &summary.numeric_by_tool,
    )?;
    table_or_empty(printer, "Tool x language combinations", &summary.tool_lang)?;
    table_or_empty(printer, "Tool x phrase combinations", &summary.tool_phrase)?;
    table_or_empty(printer, "Language x phrase combinations", &summary.lang_phrase)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::sample_rows;

    #[test]
    fn test_build_report_example() {
        let summary = build_report(&sample_rows(), &ReportOptions::default());

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.tool_frequency[0].key, "chatgpt");
        assert_eq!(summary.tool_frequency[0].count, 2);
        assert_eq!(summary.unique_repos, 2);
        assert_eq!(summary.top_repos[0].key, "r1");
        assert_eq!(summary.numeric_by_tool.len(), 2);
        assert_eq!(summary.tool_lang.len(), 3);
        assert_eq!(summary.tool_phrase.len(), 2);
        assert_eq!(summary.lang_phrase.len(), 3);
        assert_eq!(summary.matrix.len(), 2);
    }

    #[test]
    fn test_print_report_all_sections() {
        let options = ReportOptions::default();
        let summary = build_report(&sample_rows(), &options);
        let mut printer = ReportPrinter::new(Vec::new());
        print_report(&summary, &options, &mut printer).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        for title in [
            "Tool frequency",
            "Phrase frequency",
            "Language frequency",
            "Unique repositories",
            "Top 10 repositories by row count",
            "LOC statistics per tool",
            "Tool x language combinations",
            "Tool x phrase combinations",
            "Language x phrase combinations",
        ] {
            assert!(text.contains(&format!("=== {} ===", title)), "missing {}", title);
        }
        assert!(text.contains("Unique repositories: 2"));
    }

    #[test]
    fn test_print_report_guards_empty_input() {
        let options = ReportOptions::default();
        let summary = build_report(&[], &options);
        let mut printer = ReportPrinter::new(Vec::new());

        print_report(&summary, &options, &mut printer).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.contains("=== Tool frequency ===\nrows: 0"));
    }
}
