//! Delimited text reader with encoding and delimiter auto-detection.
//!
//! Fields are parsed by the `csv` crate, so quoted values may contain the
//! delimiter, quotes and newlines (snippet text usually does).

use std::path::Path;

use super::build_row;
use crate::error::{LoadError, LoadResult};
use crate::models::{Row, Table, TableSource};

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as UTF-8; chardet only guesses for other input.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> LoadResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).to_string(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (decoded, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(LoadError::Encoding(format!(
                        "content is not valid {}",
                        enc.name()
                    )));
                }
                decoded.to_string()
            }
            None => String::from_utf8_lossy(bytes).to_string(),
        },
    };

    if let Some(rest) = text.strip_prefix('\u{feff}') {
        return Ok(rest.to_string());
    }
    Ok(text)
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// Defaults to `,` when none of the candidates appear.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text into a header and rows.
///
/// `origin` is only used to name the source in errors.
pub fn parse_delimited(
    content: &str,
    delimiter: char,
    origin: &Path,
) -> LoadResult<(Vec<String>, Vec<Row>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::format(origin, "file has no header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        if let Some(row) = build_row(&headers, record.iter().map(str::to_string)) {
            rows.push(row);
        }
    }

    Ok((headers, rows))
}

/// Parse delimited bytes with auto-detection of encoding and delimiter.
pub fn parse_delimited_bytes(bytes: &[u8], origin: &Path) -> LoadResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    tracing::debug!(%encoding, ?delimiter, "delimited input detected");

    let (headers, rows) = parse_delimited(&content, delimiter, origin)?;

    Ok(Table {
        headers,
        rows,
        source: TableSource::Delimited {
            encoding,
            delimiter,
        },
    })
}

/// Read and parse a delimited file.
pub(crate) fn load_delimited_file(path: &Path) -> LoadResult<Table> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_delimited_bytes(&bytes, path)
}
