//! Table loading for spreadsheets and delimited text.
//!
//! Turns the first sheet of a workbook (or a CSV file) into [`Row`] records,
//! using the first row as the header. Cells missing from a row come back as
//! `""`, so every column is always present downstream.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐
//! │ .xlsx / .ods │────▶│  sheet (1st)  │──┐
//! └──────────────┘     └───────────────┘  │   ┌──────────────┐
//! ┌──────────────┐     ┌───────────────┐  ├──▶│  Vec<Row>    │
//! │ .csv / .tsv  │────▶│ encoding+delim│──┘   └──────────────┘
//! └──────────────┘     └───────────────┘
//! ```

pub mod delimited;
pub mod sheet;

use std::path::Path;

use crate::error::LoadResult;
use crate::models::{Row, Table};

pub use delimited::{
    decode_content, detect_delimiter, detect_encoding, parse_delimited, parse_delimited_bytes,
};
pub use sheet::load_first_sheet;

/// Extensions read as delimited text; everything else goes through calamine.
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Load a table from `path`, dispatching on the file extension.
///
/// Fails with [`crate::error::LoadError::Io`] when the file cannot be opened
/// and [`crate::error::LoadError::Format`] when there is no header row.
pub fn load_table<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    let path = path.as_ref();
    let is_delimited = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| DELIMITED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    let table = if is_delimited {
        delimited::load_delimited_file(path)?
    } else {
        sheet::load_first_sheet(path)?
    };

    tracing::debug!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "table loaded"
    );
    Ok(table)
}

/// Pair `headers` with `cells`, padding absent cells with `""`.
///
/// Returns `None` for a row whose cells are all empty.
pub(crate) fn build_row<I>(headers: &[String], cells: I) -> Option<Row>
where
    I: IntoIterator<Item = String>,
{
    let mut cells = cells.into_iter();
    let values: Vec<String> = headers
        .iter()
        .map(|_| cells.next().unwrap_or_default())
        .collect();

    if values.iter().all(|v| v.is_empty()) {
        return None;
    }

    Some(Row::from_pairs(headers.iter().cloned().zip(values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_row_pads_missing_cells() {
        let headers = vec!["tool".to_string(), "lang".to_string(), "loc".to_string()];
        let row = build_row(&headers, vec!["ChatGPT".to_string()]).unwrap();
        assert_eq!(row.get("tool"), "ChatGPT");
        assert_eq!(row.get("lang"), "");
        assert!(row.contains("loc"));
    }

    #[test]
    fn test_build_row_skips_blank() {
        let headers = vec!["a".to_string(), "b".to_string()];
        assert!(build_row(&headers, vec![String::new(), String::new()]).is_none());
    }

    #[test]
    fn test_load_csv_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "tool,lang,loc\nChatGPT,js,10\nCopilot,ts,20\n").unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.headers, vec!["tool", "lang", "loc"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("tool"), "Copilot");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_table(dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));

        let err = load_table(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_garbage_workbook_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, b"this is not a zip archive").unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, LoadError::Spreadsheet { .. }));
        assert!(err.to_string().contains("broken.xlsx"));
    }
}
