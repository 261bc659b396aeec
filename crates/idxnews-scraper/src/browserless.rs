//! Browserless-backed [`PageSession`] implementation.
//!
//! Pages are rendered through the Browserless `/content` API, which drives
//! a headless Chrome instance and returns the post-JS HTML. The returned
//! document is parsed with [`scraper`] and queried locally; element handles
//! are node ids into the parsed tree.

use std::time::Duration;

use async_trait::async_trait;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::page::{PageSession, ScrollTarget};

const SCROLL_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_SETTLE_MS: u64 = 500;

pub struct BrowserlessSession {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    current_url: Option<String>,
    current_timeout: Duration,
    html: Option<Html>,
}

impl BrowserlessSession {
    /// Build a session without contacting the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            current_url: None,
            current_timeout: Duration::from_secs(30),
            html: None,
        })
    }

    /// Build a session and verify the Browserless endpoint is reachable.
    ///
    /// Establishment failure is fatal to the caller by design: a scraper
    /// run without a browser cannot do anything useful.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] when the endpoint cannot be reached.
    pub async fn connect(base_url: &str, token: Option<&str>) -> Result<Self, ScraperError> {
        let session = Self::new(base_url, token)?;
        session.client.get(&session.base_url).send().await?;
        tracing::info!(endpoint = %session.base_url, "connected to browser endpoint");
        Ok(session)
    }

    fn content_endpoint(&self) -> String {
        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(token) = &self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// Render a URL via `/content` and replace the parsed document.
    async fn render(
        &mut self,
        url: &str,
        timeout: Duration,
        scroll_to_bottom: bool,
    ) -> Result<(), ScraperError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let mut body = serde_json::json!({
            "url": url,
            "gotoOptions": { "waitUntil": "networkidle2", "timeout": timeout_ms },
        });
        if scroll_to_bottom {
            body["addScriptTag"] = serde_json::json!([{ "content": SCROLL_BOTTOM_SCRIPT }]);
            body["waitForTimeout"] = serde_json::json!(SCROLL_SETTLE_MS);
        }

        let resp = self
            .client
            .post(self.content_endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(timeout + Duration::from_secs(5))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ScraperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = resp.text().await?;
        self.html = Some(Html::parse_document(&raw));
        self.current_url = Some(url.to_string());
        self.current_timeout = timeout;
        Ok(())
    }

    fn document(&self) -> Result<&Html, ScraperError> {
        self.html
            .as_ref()
            .ok_or_else(|| ScraperError::NoPage("navigate before querying".to_string()))
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
impl PageSession for BrowserlessSession {
    type Element = NodeId;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        tracing::debug!(url, "rendering page");
        self.render(url, timeout, false).await
    }

    async fn wait_idle(&mut self, _timeout: Duration) -> Result<(), ScraperError> {
        // /content already waits for network idle before returning HTML.
        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, ScraperError> {
        let html = self.document()?;
        let sel = parse_selector(selector)?;
        Ok(html.select(&sel).map(|el| el.id()).collect())
    }

    fn query_within(&self, element: NodeId, selector: &str) -> Result<Vec<NodeId>, ScraperError> {
        self.document()?;
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

    /// Scrolling a snapshot means re-rendering with a scroll script: the
    /// `/content` call injects a scroll-to-bottom and waits for lazy
    /// images to settle. Scrolling back to the top is a no-op; the fresh
    /// snapshot is already position-independent.
    async fn scroll_to(&mut self, target: ScrollTarget) -> Result<(), ScraperError> {
        match target {
            ScrollTarget::Bottom => {
                let Some(url) = self.current_url.clone() else {
                    return Err(ScraperError::NoPage("navigate before scrolling".to_string()));
                };
                let timeout = self.current_timeout;
                self.render(&url, timeout, true).await
            }
            ScrollTarget::Top => Ok(()),
        }
    }
}
