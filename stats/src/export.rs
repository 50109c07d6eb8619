//! CSV and JSON writers.
//!
//! Each writer owns its file handle for the duration of the call: the buffer
//! is flushed explicitly before returning, and the handle is closed when the
//! writer goes out of scope on every path, including errors. Existing files
//! are overwritten.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{ExportError, ExportResult};
use crate::models::Row;

/// How the CSV header line is derived from the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStrategy {
    /// Keys of the first row, in order.
    #[default]
    FirstRow,
    /// Keys of every row, in first-seen order.
    Union,
}

/// Header columns for `rows`, or `fallback` when there are no rows.
pub fn headers_for(rows: &[Row], strategy: HeaderStrategy, fallback: &[String]) -> Vec<String> {
    let Some(first) = rows.first() else {
        return fallback.to_vec();
    };

    match strategy {
        HeaderStrategy::FirstRow => first.keys().map(str::to_string).collect(),
        HeaderStrategy::Union => {
            let mut headers: Vec<String> = Vec::new();
            for key in rows.iter().flat_map(|r| r.keys()) {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.to_string());
                }
            }
            headers
        }
    }
}

fn create(path: &Path) -> ExportResult<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Write `rows` as CSV with a header line to any writer.
///
/// Missing columns are written as empty fields. Returns the number of data
/// rows written.
pub fn write_csv_to<W: Write>(out: W, headers: &[String], rows: &[Row]) -> ExportResult<usize> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|h| row.get(h)))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

/// Write `rows` as CSV to `path`, replacing its content.
///
/// Any write failure is reported as [`ExportError::Io`] naming `path`.
pub fn write_csv(path: &Path, headers: &[String], rows: &[Row]) -> ExportResult<usize> {
    let out = create(path)?;
    let written = write_csv_to(out, headers, rows).map_err(|e| match e {
        ExportError::Csv(err) => ExportError::Io {
            path: path.to_path_buf(),
            source: csv_to_io(err),
        },
        other => other,
    })?;
    tracing::debug!(path = %path.display(), rows = written, "csv written");
    Ok(written)
}

fn csv_to_io(err: csv::Error) -> io::Error {
    if !err.is_io_error() {
        return io::Error::new(io::ErrorKind::Other, err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    }
}

/// Write `value` as pretty-printed JSON (2-space indent) to `path`.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> ExportResult<()> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, value).map_err(|e| {
        if e.is_io() {
            ExportError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(e),
            }
        } else {
            ExportError::Json(e)
        }
    })?;
    out.write_all(b"\n")
        .and_then(|_| out.flush())
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), "json written");
    Ok(())
}
