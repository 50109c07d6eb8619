//! Domain models shared by both pipelines.
//!
//! - [`Row`] - One dataset record, column name to string value
//! - [`Table`] - Loaded rows plus their header and provenance
//! - [`FrequencyEntry`], [`ComboEntry`], [`GroupStat`] - Aggregation results
//!
//! Aggregation results serialize with the grouped column name as the key
//! (`{"tool": "chatgpt", "count": 2}`), which is also how they are printed.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Well-known column names of the snippet dataset.
pub mod columns {
    pub const TOOL: &str = "tool";
    pub const PHRASE: &str = "phrase";
    pub const LANG: &str = "lang";
    pub const REPO: &str = "repo";
    pub const LOC: &str = "loc";
    pub const SNIPPET: &str = "snippet";
}

// =============================================================================
// Row
// =============================================================================

/// A single record of the input table.
///
/// Keys keep the column order of the source header. Every value is a string;
/// numeric columns are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Build a row from `(column, value)` pairs, in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self(map)
    }

    /// Value of `field`, or `""` when the column is absent.
    pub fn get(&self, field: &str) -> &str {
        match self.0.get(field) {
            Some(Value::String(s)) => s,
            _ => "",
        }
    }

    /// Whether the row carries `field` at all.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Column names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Table
// =============================================================================

/// Where a [`Table`] was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// First sheet of a workbook.
    Sheet { name: String },
    /// Delimited text file.
    Delimited { encoding: String, delimiter: char },
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Sheet { name } => write!(f, "sheet '{}'", name),
            TableSource::Delimited { encoding, delimiter } => {
                let d = match delimiter {
                    '\t' => "TAB".to_string(),
                    c => c.to_string(),
                };
                write!(f, "{} text, delimiter '{}'", encoding, d)
            }
        }
    }
}

/// Loaded input: header, rows and provenance.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    pub source: TableSource,
}

// =============================================================================
// Aggregation results
// =============================================================================

/// Occurrence count of one value of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    /// Column the value was taken from.
    pub field: String,
    pub key: String,
    pub count: usize,
}

impl Serialize for FrequencyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.field, &self.key)?;
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}

/// Joint occurrence count of a pair of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboEntry {
    pub field1: String,
    pub field2: String,
    pub key1: String,
    pub key2: String,
    pub count: usize,
}

impl Serialize for ComboEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(&self.field1, &self.key1)?;
        map.serialize_entry(&self.field2, &self.key2)?;
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}

/// Numeric summary of one group.
///
/// `avg` and `median` are rounded to two decimals; `median` is the upper
/// median (`sorted[n / 2]`).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStat {
    /// Grouping column.
    pub field: String,
    pub group: String,
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Serialize for GroupStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry(&self.field, &self.group)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("sum", &self.sum)?;
        map.serialize_entry("avg", &self.avg)?;
        map.serialize_entry("min", &self.min)?;
        map.serialize_entry("max", &self.max)?;
        map.serialize_entry("median", &self.median)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_is_empty() {
        let row = Row::from_pairs([("tool", "ChatGPT")]);
        assert_eq!(row.get("tool"), "ChatGPT");
        assert_eq!(row.get("phrase"), "");
        assert!(!row.contains("phrase"));
    }

    #[test]
    fn test_keys_keep_source_order() {
        let row = Row::from_pairs([("tool", "a"), ("repo", "b"), ("lang", "c")]);
        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, vec!["tool", "repo", "lang"]);
    }

    #[test]
    fn test_frequency_entry_keyed_by_field() {
        let entry = FrequencyEntry {
            field: "tool".into(),
            key: "chatgpt".into(),
            count: 2,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "tool": "chatgpt", "count": 2 })
        );
    }

    #[test]
    fn test_combo_entry_format() {
        let entry = ComboEntry {
            field1: "tool".into(),
            field2: "lang".into(),
            key1: "copilot".into(),
            key2: "ts".into(),
            count: 1,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["tool"], "copilot");
        assert_eq!(value["lang"], "ts");
        assert_eq!(value["count"], 1);
    }

    #[test]
    fn test_table_source_display() {
        let src = TableSource::Delimited {
            encoding: "utf-8".into(),
            delimiter: '\t',
        };
        assert_eq!(src.to_string(), "utf-8 text, delimiter 'TAB'");
    }
}
