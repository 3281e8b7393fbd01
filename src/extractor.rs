//! Snippet extraction from page markup.
//!
//! The extractor looks for a repeated container element (by default
//! `article.product_pod`, as used on books.toscrape.com) and, inside each
//! container, the first title element (`h3 a`) whose `title` attribute holds
//! the display text.
//!
//! A page with no matching containers is not an error: the result is simply
//! empty. A container that matches but lacks its title element is skipped and
//! counted in [`Extraction::skipped`] rather than failing the whole page.

use crate::models::Extraction;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_CONTAINER_SELECTOR: &str = "article.product_pod";
pub const DEFAULT_TITLE_SELECTOR: &str = "h3 a";
pub const DEFAULT_TITLE_ATTRIBUTE: &str = "title";

/// A selector string that `scraper` refused to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid CSS selector {selector:?}: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// Compiled structural signature used to pull snippets out of a page.
#[derive(Debug, Clone)]
pub struct Extractor {
    container: Selector,
    title: Selector,
    attribute: String,
}

impl Extractor {
    /// Compile an extractor from selector strings.
    pub fn new(container: &str, title: &str, attribute: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            container: compile(container)?,
            title: compile(title)?,
            attribute: attribute.to_string(),
        })
    }

    /// Pull every container's title text out of `markup`, in document order.
    ///
    /// # Arguments
    ///
    /// * `markup` - Raw HTML. Malformed markup is parsed leniently.
    ///
    /// # Returns
    ///
    /// The titles found plus the number of containers skipped because their
    /// title was missing or blank.
    #[instrument(level = "debug", skip_all, fields(bytes = markup.len()))]
    pub fn extract(&self, markup: &str) -> Extraction {
        let document = Html::parse_document(markup);
        let mut extraction = Extraction::default();

        for (index, container) in document.select(&self.container).enumerate() {
            match self.title_of(container) {
                Some(text) => extraction.items.push(text),
                None => {
                    warn!(index, "Container has no usable title element; skipping");
                    extraction.skipped += 1;
                }
            }
        }

        info!(
            count = extraction.items.len(),
            skipped = extraction.skipped,
            "Extracted snippets"
        );
        debug!(items = ?extraction.items, "Extracted items");
        extraction
    }

    fn title_of(&self, container: ElementRef<'_>) -> Option<String> {
        let title = container.select(&self.title).next()?;
        let value = title.value().attr(&self.attribute)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_CONTAINER_SELECTOR,
            DEFAULT_TITLE_SELECTOR,
            DEFAULT_TITLE_ATTRIBUTE,
        )
        .expect("default selectors are valid")
    }
}

fn compile(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
