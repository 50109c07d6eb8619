//! Coding-challenge row filter.
//!
//! A row is removed when the lower-cased concatenation of its text fields
//! contains any challenge keyword. The removal is attributed to the first
//! matching keyword in list order, so the tally always sums to the number of
//! removed rows even when several keywords match.

use crate::models::{columns, Row};

/// Sites known to host coding-challenge problems.
pub const DEFAULT_CHALLENGE_KEYWORDS: &[&str] = &[
    "leetcode",
    "hackerrank",
    "codewars",
    "codeforces",
    "codechef",
    "topcoder",
    "atcoder",
    "spoj",
    "projecteuler",
    "project euler",
    "exercism",
    "geeksforgeeks",
    "interviewbit",
    "codesignal",
    "hackerearth",
    "kattis",
    "adventofcode",
    "advent of code",
    "codingame",
    "edabit",
    "beecrowd",
    "urionlinejudge",
    "onlinejudge",
    "cses.fi",
];

/// Columns searched by default: the snippet text and the repository.
pub fn default_text_fields() -> Vec<String> {
    vec![columns::SNIPPET.to_string(), columns::REPO.to_string()]
}

/// Rows removed per keyword, in keyword-list order.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct RemovalTally {
    counts: Vec<(String, usize)>,
}

/// One line of the removal breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

impl RemovalTally {
    fn for_keywords(keywords: &[String]) -> Self {
        Self {
            counts: keywords.iter().map(|k| (k.clone(), 0)).collect(),
        }
    }

    fn record(&mut self, index: usize) {
        self.counts[index].1 += 1;
    }

    /// Removals attributed to `keyword` (0 if unknown).
    pub fn get(&self, keyword: &str) -> usize {
        let keyword = keyword.to_lowercase();
        self.counts
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum of all tallies.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Keywords with at least one removal, most removals first.
    ///
    /// Ties keep keyword-list order.
    pub fn breakdown(&self) -> Vec<KeywordCount> {
        let mut entries: Vec<KeywordCount> = self
            .counts
            .iter()
            .filter(|(_, c)| *c > 0)
            .map(|(k, c)| KeywordCount {
                keyword: k.clone(),
                count: *c,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Result of a filter pass.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub cleaned: Vec<Row>,
    pub removed: Vec<Row>,
    pub tally: RemovalTally,
}

/// Keyword matcher over a fixed set of text columns.
#[derive(Debug, Clone)]
pub struct ChallengeFilter {
    keywords: Vec<String>,
    text_fields: Vec<String>,
}

impl Default for ChallengeFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_CHALLENGE_KEYWORDS.iter().map(|k| k.to_string()),
            default_text_fields(),
        )
    }
}

impl ChallengeFilter {
    /// Keywords are lower-cased; blank and duplicate keywords are dropped.
    pub fn new<I, S>(keywords: I, text_fields: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !list.contains(&keyword) {
                list.push(keyword);
            }
        }
        Self {
            keywords: list,
            text_fields,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn text_fields(&self) -> &[String] {
        &self.text_fields
    }

    /// Text searched for `row`: its text fields joined by newlines, lower-cased.
    fn haystack(&self, row: &Row) -> String {
        self.text_fields
            .iter()
            .map(|f| row.get(f))
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }

    /// Index of the first keyword (list order) found in `row`.
    fn first_match(&self, row: &Row) -> Option<usize> {
        let haystack = self.haystack(row);
        self.keywords.iter().position(|k| haystack.contains(k.as_str()))
    }

    /// First keyword found in `row`, if any.
    pub fn matching_keyword(&self, row: &Row) -> Option<&str> {
        self.first_match(row).map(|i| self.keywords[i].as_str())
    }

    /// Partition `rows` into kept and removed, tallying removals per keyword.
    pub fn apply(&self, rows: Vec<Row>) -> FilterOutcome {
        let mut tally = RemovalTally::for_keywords(&self.keywords);
        let mut cleaned = Vec::with_capacity(rows.len());
        let mut removed = Vec::new();

        for row in rows {
            match self.first_match(&row) {
                Some(i) => {
                    tally.record(i);
                    removed.push(row);
                }
                None => cleaned.push(row),
            }
        }

        FilterOutcome {
            cleaned,
            removed,
            tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(snippet: &str, repo: &str) -> Row {
        Row::from_pairs([("tool", "ChatGPT"), ("snippet", snippet), ("repo", repo)])
    }

    fn filter(keywords: &[&str]) -> ChallengeFilter {
        ChallengeFilter::new(keywords.iter().copied(), default_text_fields())
    }

    #[test]
    fn test_leetcode_row_removed() {
        let kept = row("fn add(a: i32, b: i32) -> i32 { a + b }", "me/utils");
        let rows = vec![row("solve this on leetcode.com", "me/solutions"), kept.clone()];

        let outcome = filter(&["leetcode"]).apply(rows);

        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(outcome.cleaned, vec![kept]);
        assert_eq!(outcome.tally.get("leetcode"), 1);
    }

    #[test]
    fn test_match_is_case_insensitive_and_checks_repo() {
        let rows = vec![
            row("", "someone/HackerRank-Solutions"),
            row("// From CodeWars kata", "x/y"),
        ];
        let outcome = filter(&["HACKERRANK", "codewars"]).apply(rows);

        assert!(outcome.cleaned.is_empty());
        assert_eq!(outcome.tally.get("hackerrank"), 1);
        assert_eq!(outcome.tally.get("codewars"), 1);
    }

    #[test]
    fn test_first_keyword_in_list_order_wins() {
        let rows = vec![row("codewars and leetcode", "")];

        let outcome = filter(&["leetcode", "codewars"]).apply(rows.clone());
        assert_eq!(outcome.tally.get("leetcode"), 1);
        assert_eq!(outcome.tally.get("codewars"), 0);

        let outcome = filter(&["codewars", "leetcode"]).apply(rows);
        assert_eq!(outcome.tally.get("codewars"), 1);
        assert_eq!(outcome.tally.get("leetcode"), 0);
    }

    #[test]
    fn test_partition_and_tally_invariants() {
        let rows = vec![
            row("leetcode 1. two sum", ""),
            row("plain code", "a/b"),
            row("", "user/codeforces-archive"),
            row("leetcode + codeforces", ""),
            Row::from_pairs([("tool", "Copilot")]),
        ];
        let total = rows.len();

        let outcome = ChallengeFilter::default().apply(rows);

        assert_eq!(outcome.cleaned.len() + outcome.removed.len(), total);
        assert_eq!(outcome.tally.total(), outcome.removed.len());
        assert_eq!(outcome.removed.len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = vec![
            row("leetcode", ""),
            row("ok", "fine/repo"),
            row("", "projecteuler-solutions"),
        ];
        let challenge = ChallengeFilter::default();

        let first = challenge.apply(rows);
        let again = challenge.apply(first.cleaned.clone());

        assert!(again.removed.is_empty());
        assert_eq!(again.cleaned, first.cleaned);
    }

    #[test]
    fn test_fields_are_not_glued_together() {
        // "leet" at the end of the snippet and "code" at the start of the repo
        let rows = vec![row("leet", "code/repo")];
        let outcome = filter(&["leetcode"]).apply(rows);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_blank_and_duplicate_keywords_dropped() {
        let challenge = filter(&["", "  ", "LeetCode", "leetcode"]);
        assert_eq!(challenge.keywords(), &["leetcode".to_string()]);

        let outcome = challenge.apply(vec![row("nothing to see", "")]);
        assert_eq!(outcome.cleaned.len(), 1);
    }

    #[test]
    fn test_breakdown_sorted_and_omits_zero() {
        let rows = vec![
            row("codewars", ""),
            row("leetcode", ""),
            row("leetcode", ""),
        ];
        let outcome = filter(&["codewars", "hackerrank", "leetcode"]).apply(rows);
        let breakdown = outcome.tally.breakdown();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].keyword, "leetcode");
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].keyword, "codewars");
    }

    #[test]
    fn test_matching_keyword() {
        let challenge = ChallengeFilter::default();
        assert_eq!(challenge.matching_keyword(&row("see adventofcode day 3", "")), Some("adventofcode"));
        assert_eq!(challenge.matching_keyword(&row("hello", "world")), None);
    }
}
