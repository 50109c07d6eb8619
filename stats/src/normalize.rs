//! Field normalization and numeric coercion.
//!
//! Grouping and keyword matching always go through [`normalize`], so case
//! differences never create distinct groups. Numeric columns go through a
//! [`NumericPolicy`]; the default substitutes `0` for anything unparsable.

use crate::models::Row;

/// Lower-cased value of `field`; a missing column yields `""`.
pub fn normalize(row: &Row, field: &str) -> String {
    row.get(field).to_lowercase()
}

/// Parse `raw` as a float, substituting `0.0` when it is empty or invalid.
pub fn parse_numeric_or_default(raw: &str) -> f64 {
    parse_numeric(raw).unwrap_or(0.0)
}

/// Parse `raw` as a finite float.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// What to do with a value that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Count the row with a value of `0` ([`parse_numeric_or_default`]).
    #[default]
    DefaultZero,
    /// Leave the row out of the statistics.
    SkipRow,
}

impl NumericPolicy {
    /// Apply the policy to one raw cell.
    pub fn apply(self, raw: &str) -> Option<f64> {
        match self {
            NumericPolicy::DefaultZero => Some(parse_numeric_or_default(raw)),
            NumericPolicy::SkipRow => parse_numeric(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        let row = Row::from_pairs([("tool", "ChatGPT")]);
        assert_eq!(normalize(&row, "tool"), "chatgpt");
    }

    #[test]
    fn test_normalize_missing_is_empty() {
        let row = Row::from_pairs([("tool", "ChatGPT")]);
        assert_eq!(normalize(&row, "lang"), "");
    }

    #[test]
    fn test_parse_numeric_or_default() {
        assert_eq!(parse_numeric_or_default("10"), 10.0);
        assert_eq!(parse_numeric_or_default(" 2.5 "), 2.5);
        assert_eq!(parse_numeric_or_default(""), 0.0);
        assert_eq!(parse_numeric_or_default("n/a"), 0.0);
        assert_eq!(parse_numeric_or_default("NaN"), 0.0);
    }

    #[test]
    fn test_policies() {
        assert_eq!(NumericPolicy::DefaultZero.apply("abc"), Some(0.0));
        assert_eq!(NumericPolicy::SkipRow.apply("abc"), None);
        assert_eq!(NumericPolicy::SkipRow.apply("7"), Some(7.0));
        assert_eq!(NumericPolicy::default(), NumericPolicy::DefaultZero);
    }
}
