//! Command-line interface definitions for Review Sentiment.
//!
//! Every tuning knob is optional here so that values from a `--config` YAML
//! file survive unless a flag or environment variable overrides them.

use clap::Parser;

/// Demo page used when no URL is given.
pub const DEFAULT_URL: &str = "http://books.toscrape.com/";

/// Command-line arguments for the Review Sentiment application.
///
/// # Examples
///
/// ```sh
/// # Analyze the demo page
/// review_sentiment
///
/// # Analyze another page and keep JSON + Markdown reports
/// review_sentiment http://books.toscrape.com/catalogue/page-2.html -j ./json -m ./markdown
///
/// # Read URLs from stdin, one per line, sharing one cache
/// review_sentiment --interactive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to scrape
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// User-Agent header sent with the request
    #[arg(long, env = "SCRAPER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// How long scraped pages stay cached, in seconds
    #[arg(long, env = "SCRAPER_CACHE_TTL_SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown report
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Keep reading URLs from stdin after the first run
    #[arg(short, long)]
    pub interactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["review_sentiment"]);
        assert_eq!(cli.url, DEFAULT_URL);
        assert!(cli.config.is_none());
        assert!(cli.json_output_dir.is_none());
        assert!(!cli.interactive);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "review_sentiment",
            "http://example.com/reviews",
            "-j",
            "/tmp/json",
            "-m",
            "/tmp/markdown",
            "-c",
            "settings.yaml",
            "-i",
        ]);

        assert_eq!(cli.url, "http://example.com/reviews");
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
        assert_eq!(cli.markdown_output_dir.as_deref(), Some("/tmp/markdown"));
        assert_eq!(cli.config.as_deref(), Some("settings.yaml"));
        assert!(cli.interactive);
    }

    #[test]
    fn test_cli_tuning_flags() {
        let cli = Cli::parse_from([
            "review_sentiment",
            "--user-agent",
            "TestAgent/1.0",
            "--timeout-secs",
            "3",
            "--cache-ttl-secs",
            "60",
        ]);
        assert_eq!(cli.user_agent.as_deref(), Some("TestAgent/1.0"));
        assert_eq!(cli.timeout_secs, Some(3));
        assert_eq!(cli.cache_ttl_secs, Some(60));
    }
}
