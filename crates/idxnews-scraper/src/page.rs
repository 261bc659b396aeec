//! Abstract page capability consumed by the extractor.
//!
//! The extractor never talks to a concrete automation engine; it sees a
//! rendered page purely through this trait. The production implementation
//! is [`crate::BrowserlessSession`]; tests drive the extractor with a
//! fixture-backed page.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

/// Scroll destination for lazy-load triggering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Bottom,
}

/// A rendered page that can be navigated and queried.
///
/// Element handles are engine-specific and only valid against the page
/// load that produced them.
#[async_trait]
pub trait PageSession: Send {
    type Element: Copy + Send + Sync;

    /// Load a URL, waiting up to `timeout` for navigation to complete.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the page cannot be fetched or rendered.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// Wait up to `timeout` for the network to go idle.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the wait cannot be performed.
    async fn wait_idle(&mut self, timeout: Duration) -> Result<(), ScraperError>;

    /// All elements matching a selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if no page is loaded or the selector is invalid.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, ScraperError>;

    /// Elements matching a selector inside `element`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if no page is loaded or the selector is invalid.
    fn query_within(
        &self,
        element: Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>, ScraperError>;

    /// Concatenated text content of an element, trimmed.
    fn text(&self, element: Self::Element) -> Option<String>;

    /// An attribute value on an element, if present.
    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    /// Scroll the page, used to trigger lazy image loading.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the scroll cannot be performed.
    async fn scroll_to(&mut self, target: ScrollTarget) -> Result<(), ScraperError>;
}
