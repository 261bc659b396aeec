//! Postgres-backed article store: the `market_news` and `stocks` tables.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use idxnews_core::store::{ArticleRecord, ArticleStore, StoreError};

/// [`ArticleStore`] implementation over a Postgres pool.
#[derive(Debug, Clone)]
pub struct NewsStore {
    pool: PgPool,
}

impl NewsStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ArticleStore for NewsStore {
    /// Check whether an identity hash is already stored.
    ///
    /// A database where the `market_news` table has not been provisioned
    /// yet reports "not a duplicate" rather than an error, so a fresh
    /// setup never blocks ingestion.
    async fn exists(&self, hash: &str) -> Result<bool, StoreError> {
        let table: Option<String> =
            sqlx::query_scalar("SELECT to_regclass('public.market_news')::text")
                .fetch_one(&self.pool)
                .await
                .map_err(to_store_error)?;
        if table.is_none() {
            return Ok(false);
        }

        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM market_news WHERE hash = $1")
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;

        Ok(found.is_some())
    }

    /// Batch insert with `ON CONFLICT (hash) DO NOTHING`.
    ///
    /// One statement per batch; re-running the same batch inserts nothing
    /// and raises no error.
    async fn insert_articles(&self, records: &[ArticleRecord]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let result = build_insert_statement(records)
            .build()
            .execute(&self.pool)
            .await
            .map_err(to_store_error)?;

        tracing::debug!(
            batch = records.len(),
            inserted = result.rows_affected(),
            "persisted news batch"
        );
        Ok(result.rows_affected())
    }

    async fn list_all_symbols(&self) -> Result<Vec<String>, StoreError> {
        let symbols: Vec<String> = sqlx::query_scalar("SELECT kode_emiten FROM stocks ORDER BY kode_emiten")
            .fetch_all(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(symbols)
    }
}

/// One `INSERT ... VALUES (...), (...) ON CONFLICT (hash) DO NOTHING`
/// statement for a whole batch.
fn build_insert_statement(records: &[ArticleRecord]) -> QueryBuilder<'_, Postgres> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO market_news \
         (hash, title, url, source, published_at, summary, stock_symbols, image_url) ",
    );
    builder.push_values(records, |mut row, r| {
        row.push_bind(&r.hash)
            .push_bind(&r.title)
            .push_bind(&r.url)
            .push_bind(&r.source)
            .push_bind(r.published_at)
            .push_bind(&r.summary)
            .push_bind(&r.stock_symbols)
            .push_bind(&r.image_url);
    });
    builder.push(" ON CONFLICT (hash) DO NOTHING");
    builder
}

fn to_store_error(e: sqlx::Error) -> StoreError {
    StoreError::Query(e.to_string())
}
