//! Grouped numeric statistics (count / sum / avg / min / max / median).

use std::collections::HashMap;

use crate::models::{GroupStat, Row};
use crate::normalize::{normalize, NumericPolicy};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Element at `floor(n / 2)` of the sorted values.
///
/// For even-length input this is the upper of the two middle values, not
/// their mean. Returns `None` for an empty slice.
pub fn median_upper(sorted: &[f64]) -> Option<f64> {
    sorted.get(sorted.len() / 2).copied()
}

/// Statistics of `numeric_field` per normalized `group_field`, largest sum first.
///
/// Unparsable or missing numbers count as `0`.
pub fn grouped_numeric_stats(rows: &[Row], group_field: &str, numeric_field: &str) -> Vec<GroupStat> {
    grouped_numeric_stats_with(rows, group_field, numeric_field, NumericPolicy::DefaultZero)
}

/// [`grouped_numeric_stats`] with an explicit [`NumericPolicy`].
///
/// Under [`NumericPolicy::SkipRow`] a group whose values all fail to parse is
/// left out of the result.
pub fn grouped_numeric_stats_with(
    rows: &[Row],
    group_field: &str,
    numeric_field: &str,
    policy: NumericPolicy,
) -> Vec<GroupStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for row in rows {
        let Some(value) = policy.apply(row.get(numeric_field)) else {
            continue;
        };
        let key = normalize(row, group_field);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![value]));
            }
        }
    }

    let mut stats: Vec<GroupStat> = groups
        .into_iter()
        .filter_map(|(group, values)| describe(group_field, group, values))
        .collect();

    stats.sort_by(|a, b| b.sum.partial_cmp(&a.sum).unwrap_or(std::cmp::Ordering::Equal));
    stats
}

fn describe(field: &str, group: String, mut values: Vec<f64>) -> Option<GroupStat> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = values.len();
    let median = median_upper(&values)?;
    let sum: f64 = values.iter().sum();
    let min = values[0];
    let max = values[count - 1];

    Some(GroupStat {
        field: field.to_string(),
        group,
        count,
        sum,
        avg: round2(sum / count as f64),
        min,
        max,
        median: round2(median),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::sample_rows;

    fn loc_rows(tool: &str, locs: &[&str]) -> Vec<Row> {
        locs.iter()
            .map(|loc| Row::from_pairs([("tool", tool), ("loc", loc)]))
            .collect()
    }

    #[test]
    fn test_stats_example() {
        let stats = grouped_numeric_stats(&sample_rows(), "tool", "loc");

        assert_eq!(stats.len(), 2);
        // copilot: sum 20, chatgpt: sum 15
        assert_eq!(stats[0].group, "copilot");
        assert_eq!(stats[0].sum, 20.0);
        assert_eq!(stats[1].group, "chatgpt");
        assert_eq!(stats[1].count, 2);
        assert_eq!(stats[1].sum, 15.0);
        assert_eq!(stats[1].avg, 7.5);
        assert_eq!(stats[1].min, 5.0);
        assert_eq!(stats[1].max, 10.0);
    }

    #[test]
    fn test_upper_median_for_even_groups() {
        let stats = grouped_numeric_stats(&loc_rows("a", &["4", "1", "3", "2"]), "tool", "loc");
        // sorted [1, 2, 3, 4] -> index 2
        assert_eq!(stats[0].median, 3.0);

        let stats = grouped_numeric_stats(&loc_rows("a", &["5", "1", "9"]), "tool", "loc");
        assert_eq!(stats[0].median, 5.0);
    }

    #[test]
    fn test_invalid_numbers_count_as_zero() {
        let stats = grouped_numeric_stats(&loc_rows("a", &["10", "oops", ""]), "tool", "loc");

        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].sum, 10.0);
        assert_eq!(stats[0].min, 0.0);
        assert_eq!(stats[0].avg, 3.33);
        assert_eq!(stats[0].median, 0.0);
    }

    #[test]
    fn test_skip_row_policy() {
        let mut rows = loc_rows("a", &["10", "oops", ""]);
        rows.extend(loc_rows("b", &["n/a"]));

        let stats = grouped_numeric_stats_with(&rows, "tool", "loc", NumericPolicy::SkipRow);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].group, "a");
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[0].min, 10.0);
    }

    #[test]
    fn test_stats_invariants() {
        let mut rows = loc_rows("Alpha", &["3", "7.25", "1", "12", "x"]);
        rows.extend(loc_rows("alpha", &["4.5"]));
        rows.extend(loc_rows("beta", &["100", "0.333"]));

        for stat in grouped_numeric_stats(&rows, "tool", "loc") {
            assert!(stat.min <= stat.median && stat.median <= stat.max, "{:?}", stat);
            let avg_tolerance = 0.005 * stat.count as f64 + 1e-9;
            assert!((stat.sum - stat.avg * stat.count as f64).abs() <= avg_tolerance, "{:?}", stat);
        }
    }

    #[test]
    fn test_sorted_by_sum_desc() {
        let mut rows = loc_rows("small", &["1"]);
        rows.extend(loc_rows("big", &["50", "50"]));
        rows.extend(loc_rows("mid", &["30"]));

        let groups: Vec<String> = grouped_numeric_stats(&rows, "tool", "loc")
            .into_iter()
            .map(|s| s.group)
            .collect();
        assert_eq!(groups, vec!["big", "mid", "small"]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(5.0), 5.0);
    }

    #[test]
    fn test_median_upper_empty() {
        assert_eq!(median_upper(&[]), None);
    }
}
