//! Tool × phrase / language pivot matrix.
//!
//! One [`MatrixRow`] per distinct tool; one column per distinct phrase
//! followed by one per distinct language, each sorted ascending. Empty tool,
//! phrase or language values are not tracked. The matrix can be exported wide
//! (one object per tool) or long (one record per non-zero cell).

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ExportResult;
use crate::export::write_json_pretty;
use crate::models::{columns, Row};
use crate::normalize::normalize;

/// Prefix given to a language column whose name is already a phrase column.
pub const LANG_COLLISION_PREFIX: &str = "lang:";

/// Co-occurrence counts for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub tool: String,
    /// `(phrase, count)` for every phrase column, in column order.
    pub phrases: Vec<(String, u64)>,
    /// `(lang, count)` for every language column, in column order.
    pub langs: Vec<(String, u64)>,
}

impl MatrixRow {
    pub fn phrase_count(&self, phrase: &str) -> u64 {
        lookup(&self.phrases, phrase)
    }

    pub fn lang_count(&self, lang: &str) -> u64 {
        lookup(&self.langs, lang)
    }

    /// Cells as `(column key, count)`, phrases first.
    ///
    /// A language sharing its name with a phrase is keyed
    /// `lang:<name>` so neither count is lost in the JSON object.
    pub fn cells(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        let phrases = self.phrases.iter().map(|(k, v)| (k.clone(), *v));
        let langs = self.langs.iter().map(move |(k, v)| {
            let key = if self.phrases.iter().any(|(p, _)| p == k) {
                format!("{}{}", LANG_COLLISION_PREFIX, k)
            } else {
                k.clone()
            };
            (key, *v)
        });
        phrases.chain(langs)
    }
}

fn lookup(cells: &[(String, u64)], key: &str) -> u64 {
    cells
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

impl Serialize for MatrixRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.phrases.len() + self.langs.len()))?;
        map.serialize_entry(columns::TOOL, &self.tool)?;
        for (key, count) in self.cells() {
            map.serialize_entry(&key, &count)?;
        }
        map.end()
    }
}

/// One non-zero cell of the matrix in long form.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LongCell {
    pub tool: String,
    /// `phrase` or `lang`.
    pub dimension: &'static str,
    pub value: String,
    pub count: u64,
}

/// Output layout of the exported matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFormat {
    #[default]
    Wide,
    Long,
}

/// Build the pivot matrix from `rows`.
pub fn build_matrix(rows: &[Row]) -> Vec<MatrixRow> {
    let mut phrase_cols: BTreeSet<String> = BTreeSet::new();
    let mut lang_cols: BTreeSet<String> = BTreeSet::new();
    // tool -> (phrase counts, lang counts)
    let mut counts: BTreeMap<String, (HashMap<String, u64>, HashMap<String, u64>)> = BTreeMap::new();

    for row in rows {
        let tool = normalize(row, columns::TOOL);
        let phrase = normalize(row, columns::PHRASE);
        let lang = normalize(row, columns::LANG);

        if !phrase.is_empty() {
            phrase_cols.insert(phrase.clone());
        }
        if !lang.is_empty() {
            lang_cols.insert(lang.clone());
        }
        if tool.is_empty() {
            continue;
        }

        let (by_phrase, by_lang) = counts.entry(tool).or_default();
        if !phrase.is_empty() {
            *by_phrase.entry(phrase).or_default() += 1;
        }
        if !lang.is_empty() {
            *by_lang.entry(lang).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(tool, (by_phrase, by_lang))| MatrixRow {
            tool,
            phrases: fill(&phrase_cols, &by_phrase),
            langs: fill(&lang_cols, &by_lang),
        })
        .collect()
}

fn fill(columns: &BTreeSet<String>, counts: &HashMap<String, u64>) -> Vec<(String, u64)> {
    columns
        .iter()
        .map(|c| (c.clone(), counts.get(c).copied().unwrap_or(0)))
        .collect()
}

/// Flatten the matrix into non-zero long-form cells.
pub fn to_long(matrix: &[MatrixRow]) -> Vec<LongCell> {
    let mut cells = Vec::new();
    for row in matrix {
        let dims = [
            (columns::PHRASE, &row.phrases),
            (columns::LANG, &row.langs),
        ];
        for (dimension, values) in dims {
            for (value, count) in values.iter().filter(|(_, c)| *c > 0) {
                cells.push(LongCell {
                    tool: row.tool.clone(),
                    dimension,
                    value: value.clone(),
                    count: *count,
                });
            }
        }
    }
    cells
}

/// Write the matrix as pretty JSON, replacing any existing file.
pub fn export_matrix(matrix: &[MatrixRow], path: &Path, format: MatrixFormat) -> ExportResult<()> {
    match format {
        MatrixFormat::Wide => write_json_pretty(path, matrix),
        MatrixFormat::Long => write_json_pretty(path, &to_long(matrix)),
    }
}
