//! Run configuration: file locations, challenge keywords, searched columns.
//!
//! Values come from built-in defaults, then the environment (a `.env` file
//! is loaded first if present), then CLI flags.

use std::path::PathBuf;

use crate::filter::{default_text_fields, ChallengeFilter, DEFAULT_CHALLENGE_KEYWORDS};

pub const DEFAULT_INPUT_PATH: &str = "ai_code_dataset.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "ai_code_dataset_no_challenges.csv";
pub const DEFAULT_MATRIX_PATH: &str = "matrix_output.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Spreadsheet or CSV to read.
    pub input_path: PathBuf,
    /// Cleaned CSV written by the cleaning pipeline.
    pub output_path: PathBuf,
    /// Pivot matrix JSON written by the reporting pipeline.
    pub matrix_path: PathBuf,
    pub keywords: Vec<String>,
    /// Columns searched for keywords.
    pub text_fields: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            matrix_path: PathBuf::from(DEFAULT_MATRIX_PATH),
            keywords: DEFAULT_CHALLENGE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            text_fields: default_text_fields(),
        }
    }
}

impl Config {
    /// Defaults overridden by `INPUT_PATH`, `OUTPUT_PATH`, `MATRIX_PATH`,
    /// `CHALLENGE_KEYWORDS` and `CHALLENGE_FIELDS` (comma separated).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = var("INPUT_PATH") {
            config.input_path = PathBuf::from(path.trim());
        }
        if let Some(path) = var("OUTPUT_PATH") {
            config.output_path = PathBuf::from(path.trim());
        }
        if let Some(path) = var("MATRIX_PATH") {
            config.matrix_path = PathBuf::from(path.trim());
        }
        if let Some(list) = var("CHALLENGE_KEYWORDS") {
            config.keywords = split_list(&list);
        }
        if let Some(list) = var("CHALLENGE_FIELDS") {
            config.text_fields = split_list(&list);
        }

        config
    }

    /// The keyword filter the cleaning pipeline runs with.
    pub fn challenge_filter(&self) -> ChallengeFilter {
        ChallengeFilter::new(&self.keywords, self.text_fields.clone())
    }
}

/// Split a comma-separated list, dropping blank items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.input_path, PathBuf::from("ai_code_dataset.xlsx"));
        assert_eq!(config.output_path, PathBuf::from("ai_code_dataset_no_challenges.csv"));
        assert_eq!(config.matrix_path, PathBuf::from("matrix_output.json"));
        assert!(config.keywords.contains(&"leetcode".to_string()));
        assert_eq!(config.text_fields, vec!["snippet", "repo"]);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("INPUT_PATH", "data/snippets.csv"),
            ("CHALLENGE_KEYWORDS", "leetcode, kata ,,"),
            ("CHALLENGE_FIELDS", "code"),
        ]));
        assert_eq!(config.input_path, PathBuf::from("data/snippets.csv"));
        assert_eq!(config.keywords, vec!["leetcode", "kata"]);
        assert_eq!(config.text_fields, vec!["code"]);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_challenge_filter_uses_configured_keywords() {
        let config = Config::from_lookup(lookup(&[("CHALLENGE_KEYWORDS", "Kata, leetcode, kata")]));
        let filter = config.challenge_filter();

        assert_eq!(filter.keywords(), &["kata".to_string(), "leetcode".to_string()]);
        assert_eq!(filter.text_fields(), &["snippet".to_string(), "repo".to_string()]);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[("INPUT_PATH", "  "), ("CHALLENGE_KEYWORDS", "")]));
        assert_eq!(config, Config::default());
    }
}
