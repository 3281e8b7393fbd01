//! Time-bounded memoization of fetch + extract, keyed by exact URL.
//!
//! A hit younger than the TTL is served without touching the network.
//! Misses and expired entries re-run the fetcher and extractor and store the
//! result, including an empty extraction. Fetch errors are returned to the
//! caller and never stored, so the next call retries. Every store also
//! sweeps out entries that have outlived the TTL, so the map never holds
//! more than the URLs seen within one TTL window.
//!
//! The current time is passed in by the caller rather than read from a
//! global clock, which keeps expiry testable.

use crate::extractor::Extractor;
use crate::fetcher::{Fetch, FetchError};
use crate::models::Extraction;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Default time-to-live for cached extractions.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A stored extraction and the moment it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Extraction,
    pub inserted_at: Instant,
}

/// An entry is expired once its age reaches `ttl`.
pub fn is_expired(entry: &CacheEntry, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(entry.inserted_at) >= ttl
}

/// Fetcher and extractor memoized as one unit.
#[derive(Debug)]
pub struct ScrapeCache<F> {
    fetcher: F,
    extractor: Extractor,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<F: Fetch> ScrapeCache<F> {
    pub fn new(fetcher: F, extractor: Extractor, ttl: Duration) -> Self {
        Self {
            fetcher,
            extractor,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Return the cached extraction for `url`, or fetch and extract it.
    ///
    /// The lock is released before the fetch so a slow server never blocks
    /// readers of other keys.
    ///
    /// # Arguments
    ///
    /// * `url` - Cache key and fetch target, used verbatim.
    /// * `now` - Current time, compared against each entry's insertion time.
    ///
    /// # Returns
    ///
    /// The stored extraction when it is younger than the TTL, otherwise a
    /// fresh one (possibly empty) that is stored with `now` as its timestamp.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's [`FetchError`] unchanged. Nothing is stored in
    /// that case.
    #[instrument(level = "info", skip(self, now))]
    pub async fn get_or_compute(&self, url: &str, now: Instant) -> Result<Extraction, FetchError> {
        if let Some(hit) = self.lookup(url, now) {
            debug!(count = hit.items.len(), "Cache hit");
            return Ok(hit);
        }

        debug!("Cache miss");
        let markup = self.fetcher.fetch(url).await?;
        let extraction = self.extractor.extract(&markup);
        self.store(url, extraction.clone(), now);
        info!(
            count = extraction.items.len(),
            ttl_secs = self.ttl.as_secs(),
            "Cached extraction"
        );
        Ok(extraction)
    }

    /// Drop the entry for `url`, if any.
    pub fn invalidate(&self, url: &str) -> bool {
        self.lock().remove(url).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries. Expired ones linger until the next store
    /// or lookup of their URL.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, url: &str, now: Instant) -> Option<Extraction> {
        let mut entries = self.lock();
        match entries.get(url) {
            Some(entry) if is_expired(entry, now, self.ttl) => {
                debug!("Cache entry expired");
                entries.remove(url);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    fn store(&self, url: &str, value: Extraction, now: Instant) {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !is_expired(entry, now, self.ttl));
        let pruned = before - entries.len();
        if pruned > 0 {
            debug!(pruned, "Pruned expired cache entries");
        }
        entries.insert(
            url.to_string(),
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
