//! Data models shared by the pipeline stages and the output writers.
//!
//! - [`Extraction`]: snippets pulled from one page, plus how many matched
//!   containers had to be skipped
//! - [`Label`] and [`ScoredRecord`]: one classified snippet
//! - [`SummaryStats`]: per-label counts and percentages
//! - [`Report`]: everything the presentation layer is allowed to see

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Snippets extracted from a single page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Title text of every well-formed container.
    pub items: Vec<String>,
    /// Containers that matched but lacked the nested title element.
    pub skipped: usize,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Discrete sentiment label assigned from a compound score.
///
/// Variant order is the display order used for charts and KPI rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// Every label, in display order.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    /// Fixed chart colour for this label.
    pub fn color(self) -> &'static str {
        match self {
            Label::Positive => "green",
            Label::Neutral => "gray",
            Label::Negative => "red",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => write!(f, "Positive"),
            Label::Neutral => write!(f, "Neutral"),
            Label::Negative => write!(f, "Negative"),
        }
    }
}

/// A snippet together with its compound score and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub text: String,
    pub label: Label,
    /// Compound polarity in `[-1.0, 1.0]`.
    pub score: f64,
}

/// Aggregate statistics over a set of [`ScoredRecord`]s.
///
/// Both maps always carry all three labels, even when a count is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: usize,
    pub counts_by_label: BTreeMap<Label, usize>,
    /// Percentages in `[0.0, 100.0]`, unrounded.
    pub percentages_by_label: BTreeMap<Label, f64>,
}

impl SummaryStats {
    pub fn count(&self, label: Label) -> usize {
        self.counts_by_label.get(&label).copied().unwrap_or(0)
    }

    pub fn percentage(&self, label: Label) -> f64 {
        self.percentages_by_label.get(&label).copied().unwrap_or(0.0)
    }
}

/// The full result of one successful pipeline run.
///
/// Serialized as-is by the JSON writer; `records` are already sorted by score,
/// highest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// The URL that was scraped.
    pub url: String,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
    pub stats: SummaryStats,
    pub records: Vec<ScoredRecord>,
    /// Containers skipped during extraction.
    pub skipped: usize,
}

impl Report {
    /// Host part of the scraped URL, used to name output files.
    ///
    /// For example: `"http://books.toscrape.com/"` -> `"books.toscrape.com"`.
    pub fn source_tag(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }
}
