//! Article extraction over a rendered listing page.
//!
//! Walks the descriptor's article containers in document order and turns
//! each into an explicit [`CandidateOutcome`]: accepted, or skipped with a
//! reason. Skips are never errors (a single bad container must not stop
//! the scan), but the cumulative duplicate count can end it early.

use chrono::Utc;

use idxnews_core::dates::parse_published_at;
use idxnews_core::relevance::RelevanceFilter;
use idxnews_core::sources::SiteDescriptor;
use idxnews_core::store::{ArticleRecord, ArticleStore};

use crate::error::ScraperError;
use crate::hash::article_hash;
use crate::page::{PageSession, ScrollTarget};

const MAX_FIELD_CHARS: usize = 500;

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Containers examined per listing page, at most.
    pub max_articles: usize,
    /// Cumulative duplicate count that ends the scan for this page.
    pub duplicate_threshold: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_articles: 20,
            duplicate_threshold: 3,
        }
    }
}

/// Why a candidate was not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingLink,
    /// Rejected by the relevance filter. Does not count as a duplicate.
    Irrelevant,
    /// Already stored under this identity hash.
    Duplicate,
    /// A field resolution failed; the container was abandoned.
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    Accepted,
    Skipped(SkipReason),
}

/// Result of scanning one listing page.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ArticleRecord>,
    /// One outcome per examined container, in document order. Containers
    /// after an early exit are never examined and have no outcome.
    pub outcomes: Vec<CandidateOutcome>,
    /// The duplicate threshold ended the scan before the container list.
    pub early_exit: bool,
}

enum Examined {
    Accepted(Box<ArticleRecord>),
    Skipped(SkipReason),
    Duplicate,
}

/// Scan the current page for new articles referencing `symbol`.
///
/// The page must already be navigated to the descriptor's listing URL.
/// Duplicate counting is cumulative over the whole container list (never
/// reset): once it reaches the threshold the remaining containers are not
/// examined at all.
///
/// # Errors
///
/// Returns [`ScraperError`] only for page-level failures (no page loaded,
/// scroll failure, bad article selector). Per-container failures become
/// [`SkipReason::Field`] outcomes.
pub async fn extract_articles<P: PageSession>(
    page: &mut P,
    descriptor: &SiteDescriptor,
    listing_url: &str,
    symbol: &str,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    opts: &ExtractOptions,
) -> Result<Extraction, ScraperError> {
    // Some sources only attach real image URLs once they scroll into view.
    if descriptor.requires_scroll {
        page.scroll_to(ScrollTarget::Bottom).await?;
        page.scroll_to(ScrollTarget::Top).await?;
    }

    let containers = page.query_all(descriptor.article_selector)?;
    if containers.is_empty() {
        tracing::debug!(symbol, source = descriptor.name, "no articles found");
    }

    let mut extraction = Extraction::default();
    let mut duplicates = 0u32;

    for container in containers.into_iter().take(opts.max_articles) {
        match examine_container(page, descriptor, listing_url, symbol, store, filter, container)
            .await
        {
            Ok(Examined::Accepted(record)) => {
                extraction.records.push(*record);
                extraction.outcomes.push(CandidateOutcome::Accepted);
            }
            Ok(Examined::Skipped(reason)) => {
                extraction.outcomes.push(CandidateOutcome::Skipped(reason));
            }
            Ok(Examined::Duplicate) => {
                duplicates += 1;
                extraction
                    .outcomes
                    .push(CandidateOutcome::Skipped(SkipReason::Duplicate));
                if duplicates >= opts.duplicate_threshold {
                    tracing::debug!(
                        symbol,
                        source = descriptor.name,
                        duplicates,
                        "early exit: duplicate threshold reached"
                    );
                    extraction.early_exit = true;
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(
                    symbol,
                    source = descriptor.name,
                    error = %e,
                    "failed to extract article; skipping"
                );
                extraction
                    .outcomes
                    .push(CandidateOutcome::Skipped(SkipReason::Field(e.to_string())));
            }
        }
    }

    Ok(extraction)
}

async fn examine_container<P: PageSession>(
    page: &mut P,
    descriptor: &SiteDescriptor,
    listing_url: &str,
    symbol: &str,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    container: P::Element,
) -> Result<Examined, ScraperError> {
    let title = first_text(page, container, descriptor.title_selector)?.unwrap_or_default();
    if title.is_empty() {
        return Ok(Examined::Skipped(SkipReason::MissingTitle));
    }

    // A None link selector means the container element is itself the anchor.
    let raw_link = match descriptor.link_selector {
        Some(sel) => page
            .query_within(container, sel)?
            .into_iter()
            .next()
            .and_then(|el| page.attribute(el, "href")),
        None => page.attribute(container, "href"),
    };
    let Some(link) = raw_link.filter(|l| !l.is_empty()) else {
        return Ok(Examined::Skipped(SkipReason::MissingLink));
    };

    let summary = match descriptor.summary_selector {
        Some(sel) => first_text(page, container, sel)?.map(|s| truncate(&s, MAX_FIELD_CHARS)),
        None => None,
    };

    if !filter.is_relevant(&title, summary.as_deref(), symbol) {
        tracing::info!(symbol, title = %truncate(&title, 30), "skipped irrelevant article");
        return Ok(Examined::Skipped(SkipReason::Irrelevant));
    }

    let url = resolve_absolute_url(&link, listing_url, descriptor);
    let hash = article_hash(&url);

    // Fail-open: a datastore hiccup must never block ingestion.
    let is_duplicate = match store.exists(&hash).await {
        Ok(known) => known,
        Err(e) => {
            tracing::warn!(error = %e, "existence check failed; treating article as new");
            false
        }
    };
    if is_duplicate {
        return Ok(Examined::Duplicate);
    }

    let now = Utc::now();
    let published_at = match descriptor.date_selector {
        Some(sel) => {
            first_text(page, container, sel)?.map_or(now, |text| parse_published_at(&text, now))
        }
        None => now,
    };

    let image_url = resolve_image(page, container, descriptor)?;

    Ok(Examined::Accepted(Box::new(ArticleRecord {
        hash,
        title: truncate(&title, MAX_FIELD_CHARS),
        url,
        source: descriptor.id.to_string(),
        published_at,
        summary,
        stock_symbols: vec![symbol.to_string()],
        image_url,
    })))
}

/// Resolve a root-relative link against the source's article domain.
///
/// The base is the listing URL truncated at `/tag/`, unless the descriptor
/// carries an explicit override (tag-page domain differs from the article
/// domain). Links that are already absolute pass through unchanged.
fn resolve_absolute_url(link: &str, listing_url: &str, descriptor: &SiteDescriptor) -> String {
    if !link.starts_with('/') {
        return link.to_string();
    }

    let base = descriptor
        .link_base_override
        .unwrap_or_else(|| listing_url.split("/tag/").next().unwrap_or(listing_url));

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}

/// Pick the thumbnail URL, preferring lazy-load attributes over `src`,
/// and discarding placeholder images.
fn resolve_image<P: PageSession>(
    page: &P,
    container: P::Element,
    descriptor: &SiteDescriptor,
) -> Result<Option<String>, ScraperError> {
    let Some(sel) = descriptor.image_selector else {
        return Ok(None);
    };
    let Some(img) = page.query_within(container, sel)?.into_iter().next() else {
        return Ok(None);
    };

    let value = descriptor
        .lazy_image_attrs
        .iter()
        .find_map(|attr| page.attribute(img, attr).filter(|v| !v.is_empty()))
        .or_else(|| page.attribute(img, "src").filter(|v| !v.is_empty()));

    Ok(value.filter(|v| {
        let lower = v.to_lowercase();
        !lower.contains("placeholder") && !lower.contains("blank")
    }))
}

fn first_text<P: PageSession>(
    page: &P,
    scope: P::Element,
    selector: &str,
) -> Result<Option<String>, ScraperError> {
    Ok(page
        .query_within(scope, selector)?
        .into_iter()
        .next()
        .and_then(|el| page.text(el))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
