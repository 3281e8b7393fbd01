//! Turn snippets into labelled [`ScoredRecord`]s.
//!
//! Labels come from fixed threshold bands over the compound score, checked in
//! this order:
//!
//! | Compound score   | Label      |
//! |------------------|------------|
//! | `>= 0.05`        | `Positive` |
//! | `<= -0.05`       | `Negative` |
//! | anything else    | `Neutral`  |

use crate::models::{Label, ScoredRecord};
use crate::sentiment::SentimentAnalyzer;
use crate::utils::truncate_for_log;
use tracing::{debug, info, instrument};

pub const POSITIVE_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Map a compound score onto its label band.
pub fn label_for_score(score: f64) -> Label {
    if score >= POSITIVE_THRESHOLD {
        Label::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}

/// Score and label a batch of snippets.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    analyzer: SentimentAnalyzer,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
        }
    }

    pub fn score(&self, text: &str) -> ScoredRecord {
        let score = self.analyzer.polarity_scores(text).compound;
        ScoredRecord {
            text: text.to_string(),
            label: label_for_score(score),
            score,
        }
    }

    /// Score and label each item.
    ///
    /// # Arguments
    ///
    /// * `items` - Snippet texts to classify.
    ///
    /// # Returns
    ///
    /// One record per item, in input order. Empty input yields empty output.
    #[instrument(level = "info", skip_all, fields(count = items.len()))]
    pub fn classify(&self, items: &[String]) -> Vec<ScoredRecord> {
        let records: Vec<ScoredRecord> = items
            .iter()
            .map(|text| {
                let record = self.score(text);
                debug!(
                    text = %truncate_for_log(text, 80),
                    score = record.score,
                    label = %record.label,
                    "Classified snippet"
                );
                record
            })
            .collect();
        info!(count = records.len(), "Classified snippets");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_threshold_boundaries_are_exact() {
        assert_eq!(label_for_score(0.05), Label::Positive);
        assert_eq!(label_for_score(-0.05), Label::Negative);
        assert_eq!(label_for_score(0.0499), Label::Neutral);
        assert_eq!(label_for_score(-0.0499), Label::Neutral);
        assert_eq!(label_for_score(0.0), Label::Neutral);
        assert_eq!(label_for_score(1.0), Label::Positive);
        assert_eq!(label_for_score(-1.0), Label::Negative);
    }

    #[test]
    fn test_classify_preserves_length_and_order() {
        let items = strings(&["Good book", "Meh", "Terrible waste of time", "Meh"]);
        let records = Classifier::new().classify(&items);
        assert_eq!(records.len(), items.len());
        for (record, item) in records.iter().zip(&items) {
            assert_eq!(&record.text, item);
        }
    }

    #[test]
    fn test_classify_labels() {
        let records = Classifier::new().classify(&strings(&[
            "Good book",
            "Meh",
            "Terrible waste of time",
        ]));
        let labels: Vec<Label> = records.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec![Label::Positive, Label::Neutral, Label::Negative]);
        assert!(records.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_classify_empty() {
        assert!(Classifier::new().classify(&[]).is_empty());
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
