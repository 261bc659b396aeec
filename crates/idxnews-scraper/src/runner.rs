//! Tier and symbol run orchestration.
//!
//! A run owns one page session and one store for its whole duration and
//! proceeds strictly sequentially: symbol by symbol, source by source,
//! with a fixed politeness delay between source fetches. No retries;
//! a failed source fetch is logged and skipped.

use std::collections::HashSet;
use std::time::Duration;

use idxnews_core::relevance::RelevanceFilter;
use idxnews_core::sources::{descriptor, descriptors, SiteDescriptor};
use idxnews_core::store::{ArticleRecord, ArticleStore};
use idxnews_core::tiers::{Tier, ACTIVE_SYMBOLS, HOT_SYMBOLS};
use idxnews_core::AppConfig;

use crate::extract::{extract_articles, ExtractOptions};
use crate::page::PageSession;

/// Resolve a tier to its symbol list, in stable order.
///
/// Hot and active are static; all is the full universe from the store;
/// cold is the universe minus the static sets. A failed universe lookup
/// is logged and yields an empty list, so the run becomes a no-op rather
/// than an error.
pub async fn resolve_tier(tier: Tier, store: &dyn ArticleStore) -> Vec<String> {
    match tier {
        Tier::Hot => HOT_SYMBOLS.iter().map(ToString::to_string).collect(),
        Tier::Active => ACTIVE_SYMBOLS.iter().map(ToString::to_string).collect(),
        Tier::All => symbol_universe(store).await,
        Tier::Cold => {
            let scheduled: HashSet<&str> = HOT_SYMBOLS
                .iter()
                .chain(ACTIVE_SYMBOLS.iter())
                .copied()
                .collect();
            symbol_universe(store)
                .await
                .into_iter()
                .filter(|s| !scheduled.contains(s.as_str()))
                .collect()
        }
    }
}

async fn symbol_universe(store: &dyn ArticleStore) -> Vec<String> {
    match store.list_all_symbols().await {
        Ok(symbols) => symbols,
        Err(e) => {
            tracing::error!(error = %e, "failed to load symbol universe");
            Vec::new()
        }
    }
}

/// Scrape every configured source for every symbol in a tier.
///
/// Returns the number of new articles accepted across the tier.
pub async fn run_tier<P: PageSession>(
    page: &mut P,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    config: &AppConfig,
    tier: Tier,
) -> usize {
    let symbols = resolve_tier(tier, store).await;
    tracing::info!(%tier, symbols = symbols.len(), "starting tier run");

    let sources: Vec<&SiteDescriptor> = descriptors().iter().collect();
    let mut total = 0usize;
    for (i, symbol) in symbols.iter().enumerate() {
        tracing::info!("[{}/{}] scraping {symbol}", i + 1, symbols.len());
        total += scrape_symbol(page, store, filter, config, symbol, &sources).await;
    }

    tracing::info!(%tier, new_articles = total, "tier run complete");
    total
}

/// Scrape one symbol, optionally restricted to a single source.
///
/// Returns the number of new articles accepted.
pub async fn run_symbol<P: PageSession>(
    page: &mut P,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    config: &AppConfig,
    symbol: &str,
    source_filter: Option<&str>,
) -> usize {
    let sources: Vec<&SiteDescriptor> = match source_filter {
        Some(id) => match descriptor(id) {
            Some(d) => vec![d],
            None => {
                tracing::error!(source = id, "unknown source id");
                return 0;
            }
        },
        None => descriptors().iter().collect(),
    };

    tracing::info!(symbol, "scraping single symbol");
    let total = scrape_symbol(page, store, filter, config, symbol, &sources).await;
    tracing::info!(symbol, new_articles = total, "symbol run complete");
    total
}

/// Scrape all given sources for one symbol and persist the accepted
/// records in a single batch.
async fn scrape_symbol<P: PageSession>(
    page: &mut P,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    config: &AppConfig,
    symbol: &str,
    sources: &[&SiteDescriptor],
) -> usize {
    let mut batch: Vec<ArticleRecord> = Vec::new();

    for source in sources {
        batch.extend(scrape_source(page, store, filter, config, symbol, source).await);
        // Politeness throttle between source fetches, deliberately fixed.
        tokio::time::sleep(Duration::from_secs(config.rate_limit_secs)).await;
    }

    if !batch.is_empty() {
        match store.insert_articles(&batch).await {
            Ok(inserted) => {
                tracing::debug!(symbol, accepted = batch.len(), inserted, "persisted batch");
            }
            Err(e) => {
                tracing::error!(symbol, error = %e, "failed to persist article batch");
            }
        }
    }

    batch.len()
}

async fn scrape_source<P: PageSession>(
    page: &mut P,
    store: &dyn ArticleStore,
    filter: &RelevanceFilter,
    config: &AppConfig,
    symbol: &str,
    source: &SiteDescriptor,
) -> Vec<ArticleRecord> {
    let url = source.listing_url(symbol);

    if let Err(e) = page
        .navigate(&url, Duration::from_secs(config.navigation_timeout_secs))
        .await
    {
        tracing::warn!(
            symbol,
            source = source.name,
            error = %e,
            "failed to fetch listing page; skipping source"
        );
        return Vec::new();
    }
    if let Err(e) = page
        .wait_idle(Duration::from_secs(config.idle_timeout_secs))
        .await
    {
        tracing::warn!(symbol, source = source.name, error = %e, "page never settled; skipping source");
        return Vec::new();
    }
    // Extra settle for late JS rendering.
    tokio::time::sleep(Duration::from_millis(config.render_settle_ms)).await;

    let opts = ExtractOptions {
        max_articles: config.max_articles_per_page,
        duplicate_threshold: config.duplicate_early_exit,
    };
    match extract_articles(page, source, &url, symbol, store, filter, &opts).await {
        Ok(extraction) => {
            if !extraction.records.is_empty() {
                tracing::info!(
                    symbol,
                    source = source.name,
                    count = extraction.records.len(),
                    "new articles"
                );
            }
            extraction.records
        }
        Err(e) => {
            tracing::warn!(symbol, source = source.name, error = %e, "extraction failed; skipping source");
            Vec::new()
        }
    }
}
