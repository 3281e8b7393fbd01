//! # Review Sentiment
//!
//! Scrapes review-like snippets from a page, classifies each one as
//! Positive, Neutral or Negative, and prints a summary.
//!
//! ## Usage
//!
//! ```sh
//! review_sentiment http://books.toscrape.com/ -j ./json -m ./markdown
//! ```
//!
//! ## Exit codes
//!
//! - `0`: report produced
//! - `1`: the page could not be fetched
//! - `2`: the page loaded but no snippets matched

use clap::Parser;
use review_sentiment::cache::ScrapeCache;
use review_sentiment::classifier::Classifier;
use review_sentiment::cli::{Cli, DEFAULT_URL};
use review_sentiment::config::Settings;
use review_sentiment::fetcher::{Fetch, HttpFetcher};
use review_sentiment::models::Report;
use review_sentiment::outputs::{json, markdown, terminal};
use review_sentiment::utils::ensure_writable_dir;
use review_sentiment::{Analysis, Pipeline, PipelineError};
use std::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("review_sentiment starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::resolve(&args).await?;
    info!(
        user_agent = %settings.user_agent,
        timeout_secs = settings.timeout_secs,
        cache_ttl_secs = settings.cache_ttl_secs,
        "Settings resolved"
    );

    // Early check: output dirs must be writable before we scrape anything
    for dir in [&args.json_output_dir, &args.markdown_output_dir].into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout())?;
    let cache = ScrapeCache::new(fetcher, settings.extractor()?, settings.cache_ttl());
    let pipeline = Pipeline::new(cache, Classifier::new());

    let mut code = run_once(&pipeline, &args, &args.url).await;

    if args.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        eprintln!("Enter a URL to scrape (blank for {DEFAULT_URL}, Ctrl-D to quit):");
        while let Some(line) = lines.next_line().await? {
            let url = match line.trim() {
                "" => DEFAULT_URL,
                other => other,
            };
            code = run_once(&pipeline, &args, url).await;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        cached_pages = pipeline.cache().len(),
        "Execution complete"
    );
    Ok(code)
}

/// Run the pipeline for one URL and present the outcome.
#[instrument(level = "info", skip(pipeline, args))]
async fn run_once<F: Fetch>(pipeline: &Pipeline<F>, args: &Cli, url: &str) -> ExitCode {
    match pipeline.run(url, Instant::now()).await {
        Ok(Analysis::Report(report)) => {
            println!("{}", terminal::render_report(&report, std::io::stdout().is_terminal()));
            write_outputs(&report, args).await;
            ExitCode::SUCCESS
        }
        Ok(Analysis::NoData { url, skipped }) => {
            warn!(%url, skipped, "No data found");
            println!("{}", terminal::render_no_data(&url, skipped));
            ExitCode::from(2)
        }
        Err(PipelineError::Fetch { url, source }) => {
            error!(%url, error = %source, transient = source.is_transient(), "Scrape failed");
            eprintln!("Error scraping URL: {source}");
            ExitCode::FAILURE
        }
    }
}

/// Write JSON and Markdown reports when their directories were given.
/// Failures are logged; the terminal summary has already been shown.
async fn write_outputs(report: &Report, args: &Cli) {
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    if let Some(dir) = &args.markdown_output_dir {
        let md = markdown::report_to_markdown(report);
        let output_markdown_filename = format!(
            "{}/{}_{}.md",
            dir.trim_end_matches('/'),
            report.generated_at.date_naive(),
            report.source_tag()
        );
        info!(path = %output_markdown_filename, "Writing Markdown");
        if let Err(e) = tokio::fs::write(&output_markdown_filename, md).await {
            error!(path = %output_markdown_filename, error = %e, "Failed writing Markdown");
        } else {
            info!(path = %output_markdown_filename, "Wrote Markdown report");
        }
    }
}
