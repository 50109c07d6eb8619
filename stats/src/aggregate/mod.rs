//! Frequency counts, cross-tabulations and grouped statistics.
//!
//! Every grouping keeps first-seen order, so results are deterministic for a
//! fixed input. Empty values are counted as their own `""` bucket: the counts
//! of [`frequency_count`] and [`combination_count`] always sum to the number
//! of rows.

pub mod stats;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::models::{ComboEntry, FrequencyEntry, Row};
use crate::normalize::normalize;

pub use stats::{grouped_numeric_stats, grouped_numeric_stats_with, median_upper, round2};

/// Counter that remembers the order keys were first seen in.
pub(crate) struct OrderedCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Hash + Eq + Clone> OrderedCounter<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries in first-seen order.
    pub(crate) fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }

    /// Entries by descending count; ties keep first-seen order.
    pub(crate) fn into_sorted_desc(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Count rows per normalized value of `field`, most frequent first.
pub fn frequency_count(rows: &[Row], field: &str) -> Vec<FrequencyEntry> {
    let mut counter = OrderedCounter::new();
    for row in rows {
        counter.add(normalize(row, field));
    }

    counter
        .into_sorted_desc()
        .into_iter()
        .map(|(key, count)| FrequencyEntry {
            field: field.to_string(),
            key,
            count,
        })
        .collect()
}

/// Count rows per normalized `(field1, field2)` pair, in first-seen order.
pub fn combination_count(rows: &[Row], field1: &str, field2: &str) -> Vec<ComboEntry> {
    let mut counter = OrderedCounter::new();
    for row in rows {
        counter.add((normalize(row, field1), normalize(row, field2)));
    }

    counter
        .into_entries()
        .into_iter()
        .map(|((key1, key2), count)| ComboEntry {
            field1: field1.to_string(),
            field2: field2.to_string(),
            key1,
            key2,
            count,
        })
        .collect()
}

/// Number of distinct raw values of `field`.
///
/// No normalization: repository identifiers are case-sensitive paths.
pub fn count_distinct(rows: &[Row], field: &str) -> usize {
    rows.iter()
        .map(|row| row.get(field))
        .collect::<HashSet<_>>()
        .len()
}

/// The `n` most frequent raw values of `field`.
pub fn top_n(rows: &[Row], field: &str, n: usize) -> Vec<FrequencyEntry> {
    let mut counter = OrderedCounter::new();
    for row in rows {
        counter.add(row.get(field));
    }

    counter
        .into_sorted_desc()
        .into_iter()
        .take(n)
        .map(|(key, count)| FrequencyEntry {
            field: field.to_string(),
            key: key.to_string(),
            count,
        })
        .collect()
}
