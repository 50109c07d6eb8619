//! Console table rendering.
//!
//! Column headers are the keys of the first record, in that record's key
//! order; an `(index)` column numbers the rows. Any `Serialize` record that
//! becomes a flat JSON object can be printed.

use std::io::{Stdout, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ReportError, ReportResult};

const INDEX_HEADER: &str = "(index)";

/// Writes titled tables to a console-like sink.
pub struct ReportPrinter<W: Write> {
    out: W,
}

impl ReportPrinter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print a section header without a table.
    pub fn section(&mut self, title: &str) -> ReportResult<()> {
        writeln!(self.out, "\n{}", section_header(title))?;
        Ok(())
    }

    /// Print a single `label: value` line.
    pub fn line(&mut self, label: &str, value: impl std::fmt::Display) -> ReportResult<()> {
        writeln!(self.out, "{}: {}", label, value)?;
        Ok(())
    }

    /// Print `title` followed by `records` as a table.
    ///
    /// Fails with [`ReportError::EmptyRecords`] when `records` is empty;
    /// callers guard empty results first.
    pub fn table<T: Serialize>(&mut self, title: &str, records: &[T]) -> ReportResult<()> {
        let rendered = render_table(title, records)?;
        writeln!(self.out, "\n{}", rendered)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn section_header(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Render `title` and `records` as a boxed text table.
pub fn render_table<T: Serialize>(title: &str, records: &[T]) -> ReportResult<String> {
    let objects = records
        .iter()
        .map(|r| -> ReportResult<Map<String, Value>> {
            match serde_json::to_value(r)? {
                Value::Object(map) => Ok(map),
                _ => Err(ReportError::NotATable {
                    title: title.to_string(),
                }),
            }
        })
        .collect::<ReportResult<Vec<_>>>()?;

    let first = objects.first().ok_or_else(|| ReportError::EmptyRecords {
        title: title.to_string(),
    })?;

    let mut headers = vec![INDEX_HEADER.to_string()];
    headers.extend(first.keys().cloned());

    let body: Vec<Vec<String>> = objects
        .iter()
        .enumerate()
        .map(|(i, obj)| {
            let mut cells = vec![i.to_string()];
            cells.extend(
                headers[1..]
                    .iter()
                    .map(|h| obj.get(h).map(format_cell).unwrap_or_default()),
            );
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|c| {
            body.iter()
                .map(|row| display_width(&row[c]))
                .chain(std::iter::once(display_width(&headers[c])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&section_header(title));
    out.push('\n');
    out.push_str(&rule(&widths, '┌', '┬', '┐'));
    out.push_str(&table_line(&headers, &widths));
    out.push_str(&rule(&widths, '├', '┼', '┤'));
    for row in &body {
        out.push_str(&table_line(row, &widths));
    }
    out.push_str(&rule(&widths, '└', '┴', '┘'));
    Ok(out)
}

/// Cell text for a JSON value; integral floats print without a fraction.
fn format_cell(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_f64() || f.fract() != 0.0 => n.to_string(),
            Some(f) if f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    };
    text.replace(['\n', '\r', '\t'], " ")
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - display_width(cell))))
        .collect();
    format!("│{}│\n", padded.join("│"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyEntry;
    use serde_json::json;

    fn freq(key: &str, count: usize) -> FrequencyEntry {
        FrequencyEntry {
            field: "tool".into(),
            key: key.into(),
            count,
        }
    }

    #[test]
    fn test_render_uses_first_record_keys() {
        let table = render_table("Tool frequency", &[freq("chatgpt", 2), freq("copilot", 1)]).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "=== Tool frequency ===");
        assert_eq!(lines[2], "│ (index) │ tool    │ count │");
        assert_eq!(lines[4], "│ 0       │ chatgpt │ 2     │");
        assert_eq!(lines[5], "│ 1       │ copilot │ 1     │");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_empty_records_fail() {
        let err = render_table::<FrequencyEntry>("Nothing", &[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptyRecords { .. }));
    }

    #[test]
    fn test_non_object_records_fail() {
        let err = render_table("Numbers", &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ReportError::NotATable { .. }));
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!(10.0)), "10");
        assert_eq!(format_cell(&json!(7.5)), "7.5");
        assert_eq!(format_cell(&json!(3)), "3");
        assert_eq!(format_cell(&json!("a\nb")), "a b");
        assert_eq!(format_cell(&Value::Null), "");
    }

    #[test]
    fn test_missing_keys_in_later_records() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
        let table = render_table("Sparse", &records).unwrap();
        assert!(table.contains("│ 1       │ 3 │   │"));
    }

    #[test]
    fn test_printer_writes_to_sink() {
        let mut printer = ReportPrinter::new(Vec::new());
        printer.table("Tool frequency", &[freq("chatgpt", 2)]).unwrap();
        printer.line("Unique repositories", 2).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.contains("=== Tool frequency ==="));
        assert!(text.ends_with("Unique repositories: 2\n"));
    }
}
