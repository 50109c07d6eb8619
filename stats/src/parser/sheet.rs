//! Workbook reader (xlsx, xlsm, xls, xlsb, ods) via calamine.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::build_row;
use crate::error::{LoadError, LoadResult};
use crate::models::{Table, TableSource};

/// Load the first sheet (in the workbook's declared order) of `path`.
pub fn load_first_sheet(path: &Path) -> LoadResult<Table> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        LoadError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| LoadError::format(path, "workbook has no sheets"))?;
    tracing::debug!(sheets = ?sheet_names, selected = %sheet_name, "reading first sheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Spreadsheet {
            path: path.to_path_buf(),
            message: format!("cannot read sheet '{}': {}", sheet_name, e),
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| cell_to_string(c).trim().to_string()).collect())
        .unwrap_or_default();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::format(
            path,
            format!("sheet '{}' has no header row", sheet_name),
        ));
    }

    let records = rows
        .filter_map(|row| build_row(&headers, row.iter().map(cell_to_string)))
        .collect();

    Ok(Table {
        headers,
        rows: records,
        source: TableSource::Sheet { name: sheet_name },
    })
}

/// Render a cell as the string the dataset stores; empty cells become `""`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim_end_matches('\r').to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
