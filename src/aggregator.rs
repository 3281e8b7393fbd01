//! Tabulate classified records into per-label counts and percentages.

use crate::models::{Label, ScoredRecord, SummaryStats};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Count labels and derive percentages.
///
/// # Arguments
///
/// * `records` - Classified records, in any order.
///
/// # Returns
///
/// Stats with an entry for every [`Label`]. An empty slice yields
/// `total == 0` and every count and percentage at zero.
pub fn summarize(records: &[ScoredRecord]) -> SummaryStats {
    let total = records.len();
    let observed = records.iter().map(|r| r.label).counts();

    let counts_by_label: BTreeMap<Label, usize> = Label::ALL
        .iter()
        .map(|&label| (label, observed.get(&label).copied().unwrap_or(0)))
        .collect();

    let percentages_by_label = counts_by_label
        .iter()
        .map(|(&label, &count)| {
            let pct = if total == 0 {
                0.0
            } else {
                100.0 * count as f64 / total as f64
            };
            (label, pct)
        })
        .collect();

    SummaryStats {
        total,
        counts_by_label,
        percentages_by_label,
    }
}

/// Sort by score, highest first. Ties keep their original relative order.
///
/// Scores come out of the scorer with `-0.0` already folded into `0.0`, so
/// the total order never splits a neutral tie.
pub fn sort_by_score_desc(records: &[ScoredRecord]) -> Vec<ScoredRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted
}
