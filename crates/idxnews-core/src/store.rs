//! Datastore interface consumed by the scraping pipeline.
//!
//! The pipeline only needs three operations: a hash existence check, a
//! batched insert-or-skip, and the full symbol universe for cold-tier
//! resolution. The Postgres implementation lives in `idxnews-db`; tests
//! use an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A news article ready for persistence. Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Identity hash derived from the canonical absolute URL.
    pub hash: String,
    /// Article title, truncated to 500 characters.
    pub title: String,
    /// Canonical absolute article URL.
    pub url: String,
    /// Source id from the descriptor registry.
    pub source: String,
    pub published_at: DateTime<Utc>,
    /// Listing-page summary, truncated to 500 characters, when available.
    pub summary: Option<String>,
    /// Symbols this article was discovered under. Seeded with the
    /// triggering symbol only; never extended on duplicate discovery.
    pub stock_symbols: Vec<String>,
    /// Thumbnail URL, with placeholder images filtered to `None`.
    pub image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("datastore query failed: {0}")]
    Query(String),
}

/// Existence check, batched upsert, and symbol-universe lookup.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Whether an article with this identity hash is already stored.
    ///
    /// Implementations must treat a not-yet-provisioned store as "no prior
    /// duplicate" rather than an error (fail-open).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure; callers treat errors as
    /// "not a duplicate".
    async fn exists(&self, hash: &str) -> Result<bool, StoreError>;

    /// Insert records, skipping identity-hash conflicts. Idempotent under
    /// repeated identical batches. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    async fn insert_articles(&self, records: &[ArticleRecord]) -> Result<u64, StoreError>;

    /// Every ticker symbol in the universe, for cold-tier resolution.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails.
    async fn list_all_symbols(&self) -> Result<Vec<String>, StoreError>;
}
