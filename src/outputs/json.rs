//! JSON output for the report.
//!
//! Files are grouped by the report's UTC date and named after the scraped host:
//! ```text
//! json_output_dir/
//! └── 2026-10-16/
//!     └── books.toscrape.com.json
//! ```
//! Re-running against the same host on the same day overwrites the file.

use crate::models::Report;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Report`] to `{json_output_dir}/{date}/{host}.json`.
///
/// Returns the path that was written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(report: &Report, json_output_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let date = report.generated_at.date_naive();
    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), date);

    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/{}.json", full_json_dir, report.source_tag());
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, "Wrote JSON report");

    Ok(output_json_filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize;
    use crate::models::{Label, ScoredRecord};
    use chrono::Utc;

    #[tokio::test]
    async fn test_write_report_round_trips() {
        let records = vec![ScoredRecord {
            text: "Good book".into(),
            label: Label::Positive,
            score: 0.4404,
        }];
        let report = Report {
            url: "http://books.toscrape.com/".into(),
            generated_at: Utc::now(),
            stats: summarize(&records),
            records,
            skipped: 0,
        };
        let dir = std::env::temp_dir().join(format!("review_sentiment_json_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();

        let path = write_report(&report, &dir_str).await.unwrap();
        assert!(path.ends_with("books.toscrape.com.json"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.stats, report.stats);
        assert_eq!(parsed.records, report.records);
        assert!(raw.contains("\"Positive\""));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
