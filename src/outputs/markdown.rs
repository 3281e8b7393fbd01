//! Markdown rendering of a [`Report`].
//!
//! The document has a KPI table (one row per label) followed by every
//! snippet, highest score first.

use crate::models::{Label, Report};
use crate::utils::format_percent;
use std::fmt::Write;

/// Render the whole report as a Markdown document.
pub fn report_to_markdown(report: &Report) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Sentiment of {}\n", report.url);
    let _ = writeln!(
        md,
        "_Generated {} from {} snippets._\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.stats.total
    );
    if report.skipped > 0 {
        let _ = writeln!(
            md,
            "> {} matched element(s) had no title and were skipped.\n",
            report.skipped
        );
    }

    md.push_str("## Summary\n\n");
    md.push_str("| Sentiment | Share | Count |\n|---|---:|---:|\n");
    for label in Label::ALL {
        let _ = writeln!(
            md,
            "| {} | {} | {} |",
            label,
            format_percent(report.stats.percentage(label)),
            report.stats.count(label)
        );
    }

    md.push_str("\n## Analyzed Data\n\n");
    md.push_str("| Review Text | Sentiment | Score |\n|---|---|---:|\n");
    for record in &report.records {
        let _ = writeln!(
            md,
            "| {} | {} | {:.4} |",
            escape_cell(&record.text),
            record.label,
            record.score
        );
    }

    md
}

/// Keep pipes and newlines from breaking the table layout.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
