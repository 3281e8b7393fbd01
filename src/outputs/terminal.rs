//! Plain-terminal rendering: KPI lines, a coloured bar per label, and the
//! score-sorted table.

use crate::models::{Label, Report};
use crate::utils::format_percent;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const RESET: &str = "\x1b[0m";

/// ANSI escape for a label's fixed chart colour.
fn ansi(label: Label) -> &'static str {
    match label.color() {
        "green" => "\x1b[32m",
        "red" => "\x1b[31m",
        _ => "\x1b[90m",
    }
}

/// Render a report. With `color == false` no escape codes are emitted.
pub fn render_report(report: &Report, color: bool) -> String {
    let mut out = String::new();
    let paint = |label: Label, text: &str| {
        if color {
            format!("{}{}{}", ansi(label), text, RESET)
        } else {
            text.to_string()
        }
    };

    let _ = writeln!(out, "Done! Analyzed {} reviews from {}", report.stats.total, report.url);
    if report.skipped > 0 {
        let _ = writeln!(out, "({} matched element(s) skipped: missing title)", report.skipped);
    }

    out.push_str("\nHigh-Level Summary\n");
    for label in Label::ALL {
        let _ = writeln!(
            out,
            "  {:<9} {:>7}  {} Reviews",
            label.to_string(),
            format_percent(report.stats.percentage(label)),
            report.stats.count(label)
        );
    }

    out.push_str("\nSentiment Breakdown\n");
    for label in Label::ALL {
        let width = (report.stats.percentage(label) / 100.0 * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<9} {}",
            label.to_string(),
            paint(label, &"█".repeat(width))
        );
    }

    out.push_str("\nAnalyzed Data (-1 is Negative, +1 is Positive)\n");
    for record in &report.records {
        let _ = writeln!(
            out,
            "  {:>7.4}  {}  {}",
            record.score,
            paint(record.label, &format!("{:<8}", record.label.to_string())),
            record.text
        );
    }
    out
}

/// Message shown when the page loaded but nothing matched.
pub fn render_no_data(url: &str, skipped: usize) -> String {
    let mut msg = format!("No reviews found at {url}. Check the URL or the HTML tags.");
    if skipped > 0 {
        let _ = write!(msg, " ({skipped} matched element(s) had no title.)");
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize;
    use crate::models::ScoredRecord;
    use chrono::Utc;

    fn sample() -> Report {
        let records = vec![
            ScoredRecord {
                text: "Good book".into(),
                label: Label::Positive,
                score: 0.4404,
            },
            ScoredRecord {
                text: "Terrible waste of time".into(),
                label: Label::Negative,
                score: -0.7096,
            },
        ];
        Report {
            url: "http://books.toscrape.com/".into(),
            generated_at: Utc::now(),
            stats: summarize(&records),
            records,
            skipped: 0,
        }
    }

    #[test]
    fn test_plain_render_has_kpis_and_table() {
        let out = render_report(&sample(), false);
        assert!(out.contains("Analyzed 2 reviews"));
        assert!(out.contains("Positive    50.0%  1 Reviews"));
        assert!(out.contains("Neutral      0.0%  0 Reviews"));
        assert!(out.contains("-0.7096  Negative  Terrible waste of time"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_colored_render_uses_label_colors() {
        let out = render_report(&sample(), true);
        assert!(out.contains("\x1b[32m"));
        assert!(out.contains("\x1b[31m"));
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(
            render_no_data("http://x/", 0),
            "No reviews found at http://x/. Check the URL or the HTML tags."
        );
        assert!(render_no_data("http://x/", 3).contains("3 matched element(s)"));
    }
}
