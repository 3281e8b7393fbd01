//! HTTP fetching with a strict success-status contract.
//!
//! A [`Fetch`] implementation turns a URL into raw markup or a typed
//! [`FetchError`]. The production implementation, [`HttpFetcher`], sends a
//! single GET with a browser-like `User-Agent` (some servers reject empty or
//! default agents) and a finite timeout. It never retries.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch did not produce markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// DNS, connect, timeout, or body-read failure.
    #[error("network error: {message}")]
    Network { message: String },
    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {code}")]
    HttpStatus { code: u16 },
    /// The input could not be used as an absolute http(s) URL.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// Only network-level failures are worth trying again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return FetchError::HttpStatus {
                code: status.as_u16(),
            };
        }
        FetchError::Network {
            message: e.to_string(),
        }
    }
}

/// Something that can turn a URL into page markup.
///
/// The cache and pipeline are generic over this trait so tests can count
/// calls or script failures without touching the network. Callers are
/// single-task, so the returned future carries no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Validate that `raw` is an absolute http(s) URL.
pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

/// [`Fetch`] implementation backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a fixed `User-Agent` and request timeout.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Value of the `User-Agent` header. An empty or blank
    ///   string falls back to [`DEFAULT_USER_AGENT`].
    /// * `timeout` - Upper bound for the whole request, connect through body.
    ///
    /// # Returns
    ///
    /// A fetcher ready to be shared by reference.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let agent = if user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT
        } else {
            user_agent
        };
        let client = reqwest::Client::builder()
            .user_agent(agent)
            .timeout(timeout)
            .build()?;
        debug!(agent, ?timeout, "Built HTTP client");
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_url(url)?;
        let t0 = Instant::now();

        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!(error = %e, elapsed_ms = t0.elapsed().as_millis(), "Request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(code = status.as_u16(), "Non-success status");
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched page"
        );
        Ok(body)
    }
}
