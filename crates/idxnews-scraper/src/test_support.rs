//! Fixture-backed page session and in-memory store for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use idxnews_core::store::{ArticleRecord, ArticleStore, StoreError};

use crate::error::ScraperError;
use crate::page::{PageSession, ScrollTarget};

/// A [`PageSession`] over pre-rendered fixture HTML.
///
/// Either holds a single parsed document, or a URL → HTML map so that
/// `navigate` can serve different listings. Records navigations and scroll
/// calls for assertions.
pub(crate) struct StaticPage {
    html: Option<Html>,
    pages: HashMap<String, String>,
    pub navigations: Vec<String>,
    pub scroll_calls: Vec<ScrollTarget>,
}

impl StaticPage {
    pub(crate) fn from_html(raw: &str) -> Self {
        Self {
            html: Some(Html::parse_document(raw)),
            pages: HashMap::new(),
            navigations: Vec::new(),
            scroll_calls: Vec::new(),
        }
    }

    pub(crate) fn with_pages(pages: HashMap<String, String>) -> Self {
        Self {
            html: None,
            pages,
            navigations: Vec::new(),
            scroll_calls: Vec::new(),
        }
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        let html = self.html.as_ref()?;
        ElementRef::wrap(html.tree.get(id)?)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl PageSession for StaticPage {
    type Element = NodeId;

    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), ScraperError> {
        self.navigations.push(url.to_string());
        match self.pages.get(url) {
            Some(raw) => {
                self.html = Some(Html::parse_document(raw));
                Ok(())
            }
            // A preloaded single document serves any URL.
            None if self.pages.is_empty() && self.html.is_some() => Ok(()),
            None => Err(ScraperError::Navigation {
                url: url.to_string(),
                reason: "no fixture for this url".to_string(),
            }),
        }
    }

    async fn wait_idle(&mut self, _timeout: Duration) -> Result<(), ScraperError> {
        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, ScraperError> {
        let html = self
            .html
            .as_ref()
            .ok_or_else(|| ScraperError::NoPage("no fixture loaded".to_string()))?;
        let sel = parse_selector(selector)?;
        Ok(html.select(&sel).map(|el| el.id()).collect())
    }

    fn query_within(&self, element: NodeId, selector: &str) -> Result<Vec<NodeId>, ScraperError> {
        let sel = parse_selector(selector)?;
        let Some(el) = self.element(element) else {
            return Ok(Vec::new());
        };
        Ok(el.select(&sel).map(|e| e.id()).collect())
    }

    fn text(&self, element: NodeId) -> Option<String> {
        let el = self.element(element)?;
        Some(el.text().collect::<String>().trim().to_string())
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        let el = self.element(element)?;
        el.value().attr(name).map(str::to_owned)
    }

    async fn scroll_to(&mut self, target: ScrollTarget) -> Result<(), ScraperError> {
        self.scroll_calls.push(target);
        Ok(())
    }
}

/// In-memory [`ArticleStore`] with instrumented calls.
#[derive(Default)]
pub(crate) struct MemoryStore {
    existing: HashSet<String>,
    symbols: Vec<String>,
    pub inserted: Mutex<Vec<ArticleRecord>>,
    pub exists_calls: AtomicUsize,
    fail_exists: bool,
    fail_symbols: bool,
}

impl MemoryStore {
    pub(crate) fn with_existing_urls(urls: &[&str]) -> Self {
        Self {
            existing: urls.iter().map(|u| crate::article_hash(u)).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_symbols(symbols: &[&str]) -> Self {
        Self {
            symbols: symbols.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing_exists() -> Self {
        Self {
            fail_exists: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_symbols() -> Self {
        Self {
            fail_symbols: true,
            ..Self::default()
        }
    }

    pub(crate) fn inserted_count(&self) -> usize {
        self.inserted.lock().unwrap().len()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn exists(&self, hash: &str) -> Result<bool, StoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_exists {
            return Err(StoreError::Query("store offline".to_string()));
        }
        Ok(self.existing.contains(hash))
    }

    async fn insert_articles(&self, records: &[ArticleRecord]) -> Result<u64, StoreError> {
        let mut inserted = self.inserted.lock().unwrap();
        let mut count = 0u64;
        for record in records {
            if inserted.iter().any(|r| r.hash == record.hash) {
                continue;
            }
            inserted.push(record.clone());
            count += 1;
        }
        Ok(count)
    }

    async fn list_all_symbols(&self) -> Result<Vec<String>, StoreError> {
        if self.fail_symbols {
            return Err(StoreError::Query("store offline".to_string()));
        }
        Ok(self.symbols.clone())
    }
}
