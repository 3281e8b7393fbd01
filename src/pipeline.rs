//! End-to-end orchestration: URL → cache(fetch → extract) → classify → summarize.
//!
//! [`Pipeline::run`] composes the stages explicitly and holds no session
//! state beyond the cache. Outcomes are always distinguishable:
//!
//! - `Err(PipelineError::Fetch { .. })`: nothing was classified
//! - `Ok(Analysis::NoData { .. })`: the page loaded but nothing matched
//! - `Ok(Analysis::Report(..))`: stats plus score-sorted records

use crate::aggregator::{sort_by_score_desc, summarize};
use crate::cache::ScrapeCache;
use crate::classifier::Classifier;
use crate::fetcher::{Fetch, FetchError};
use crate::models::{Label, Report};
use chrono::Utc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Why a pipeline run stopped before classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("could not scrape {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Successful pipeline outcome.
#[derive(Debug, Clone)]
pub enum Analysis {
    /// The page was fetched but no snippets were found.
    NoData { url: String, skipped: usize },
    Report(Report),
}

pub struct Pipeline<F> {
    cache: ScrapeCache<F>,
    classifier: Classifier,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(cache: ScrapeCache<F>, classifier: Classifier) -> Self {
        Self { cache, classifier }
    }

    pub fn cache(&self) -> &ScrapeCache<F> {
        &self.cache
    }

    /// Run every stage for `url`, treating `now` as the current time for the
    /// cache.
    ///
    /// # Arguments
    ///
    /// * `url` - Page to analyse. It doubles as the cache key.
    /// * `now` - Current time, used for cache expiry.
    ///
    /// # Returns
    ///
    /// [`Analysis::Report`] with stats and score-sorted records, or
    /// [`Analysis::NoData`] when the page yielded no snippets.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] when the page could not be fetched.
    #[instrument(level = "info", skip(self, now))]
    pub async fn run(&self, url: &str, now: Instant) -> Result<Analysis, PipelineError> {
        let extraction = self
            .cache
            .get_or_compute(url, now)
            .await
            .map_err(|source| PipelineError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if extraction.is_empty() {
            warn!(skipped = extraction.skipped, "No snippets found on page");
            return Ok(Analysis::NoData {
                url: url.to_string(),
                skipped: extraction.skipped,
            });
        }

        let records = self.classifier.classify(&extraction.items);
        let stats = summarize(&records);
        info!(
            total = stats.total,
            positive = stats.count(Label::Positive),
            neutral = stats.count(Label::Neutral),
            negative = stats.count(Label::Negative),
            "Summarized sentiment"
        );

        Ok(Analysis::Report(Report {
            url: url.to_string(),
            generated_at: Utc::now(),
            stats,
            records: sort_by_score_desc(&records),
            skipped: extraction.skipped,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::cache::tests::ScriptedFetcher;
    use crate::extractor::Extractor;
    use crate::fetcher::{DEFAULT_USER_AGENT, HttpFetcher};
    use std::time::Duration;

    const THREE_BOOKS: &str = r#"<html><body><section><ol class="row">
<li><article class="product_pod"><h3><a href="a.html" title="Good book">Good book</a></h3></article></li>
<li><article class="product_pod"><h3><a href="b.html" title="Meh">Meh</a></h3></article></li>
<li><article class="product_pod"><h3><a href="c.html" title="Terrible waste of time">Terrible...</a></h3></article></li>
</ol></section></body></html>"#;

    fn pipeline(fetcher: ScriptedFetcher) -> Pipeline<ScriptedFetcher> {
        Pipeline::new(
            ScrapeCache::new(fetcher, Extractor::default(), DEFAULT_TTL),
            Classifier::new(),
        )
    }

    #[tokio::test]
    async fn test_three_books_end_to_end() {
        let pipeline = pipeline(ScriptedFetcher::always(THREE_BOOKS));
        let analysis = pipeline
            .run("http://books.toscrape.com/", Instant::now())
            .await
            .unwrap();

        let Analysis::Report(report) = analysis else {
            panic!("expected a report");
        };
        assert_eq!(report.stats.total, 3);
        for label in Label::ALL {
            assert_eq!(report.stats.count(label), 1);
            assert!((report.stats.percentage(label) - 33.3).abs() < 0.1);
        }

        // Sorted by score, highest first.
        let ordered: Vec<(&str, Label)> = report
            .records
            .iter()
            .map(|r| (r.text.as_str(), r.label))
            .collect();
        assert_eq!(
            ordered,
            vec![
                ("Good book", Label::Positive),
                ("Meh", Label::Neutral),
                ("Terrible waste of time", Label::Negative),
            ]
        );
        assert_eq!(report.skipped, 0);
    }

    #[tokio::test]
    async fn test_no_matching_containers_is_no_data() {
        let pipeline = pipeline(ScriptedFetcher::always(
            "<html><body><div class='other'>x</div></body></html>",
        ));
        let analysis = pipeline.run("http://x/", Instant::now()).await.unwrap();
        assert!(matches!(analysis, Analysis::NoData { skipped: 0, .. }));
    }

    #[tokio::test]
    async fn test_only_malformed_containers_is_no_data_with_skip_count() {
        let pipeline = pipeline(ScriptedFetcher::always(
            r#"<article class="product_pod"><h3>untitled</h3></article>"#,
        ));
        let analysis = pipeline.run("http://x/", Instant::now()).await.unwrap();
        assert!(matches!(analysis, Analysis::NoData { skipped: 1, .. }));
    }

    #[tokio::test]
    async fn test_fetch_error_stops_pipeline() {
        let pipeline = pipeline(ScriptedFetcher::new(vec![Err(FetchError::HttpStatus {
            code: 404,
        })]));
        let err = pipeline.run("http://x/", Instant::now()).await.unwrap_err();
        let PipelineError::Fetch { source, .. } = err;
        assert_eq!(source, FetchError::HttpStatus { code: 404 });
        assert!(pipeline.cache().is_empty());
    }

    #[tokio::test]
    async fn test_real_http_404_produces_no_report() {
        let url = crate::fetcher::tests::serve_once("404 Not Found", "gone").await;
        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap();
        let pipeline = Pipeline::new(
            ScrapeCache::new(fetcher, Extractor::default(), DEFAULT_TTL),
            Classifier::new(),
        );

        let err = pipeline.run(&url, Instant::now()).await.unwrap_err();
        assert_eq!(
            err,
            PipelineError::Fetch {
                url: url.clone(),
                source: FetchError::HttpStatus { code: 404 },
            }
        );
    }

    #[tokio::test]
    async fn test_second_run_is_served_from_cache() {
        let pipeline = pipeline(ScriptedFetcher::always(THREE_BOOKS));
        let t0 = Instant::now();
        pipeline.run("http://x/", t0).await.unwrap();
        pipeline
            .run("http://x/", t0 + Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(pipeline.cache().fetcher().calls(), 1);
        assert_eq!(pipeline.cache().len(), 1);
    }
}
