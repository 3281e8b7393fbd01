//! # Review Sentiment
//!
//! Scrape short review snippets from one web page, score each snippet's
//! sentiment with a fixed lexicon, and summarize the labels.
//!
//! ## Architecture
//!
//! 1. **Fetching**: one HTTP GET per cache miss ([`fetcher`])
//! 2. **Extraction**: container/title pattern matched in the parsed page ([`extractor`])
//! 3. **Caching**: fetch + extract memoized per URL for a TTL ([`cache`])
//! 4. **Classification**: compound score and label per snippet ([`classifier`], [`sentiment`])
//! 5. **Aggregation**: per-label counts, percentages, sorted records ([`aggregator`])
//!
//! [`pipeline::Pipeline`] wires the stages together; [`outputs`] renders the
//! resulting [`models::Report`].

pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod sentiment;
pub mod utils;

pub use pipeline::{Analysis, Pipeline, PipelineError};
