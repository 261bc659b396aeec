use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub browserless_url: String,
    pub browserless_token: Option<String>,
    pub log_level: String,
    pub keywords_path: PathBuf,
    pub rate_limit_secs: u64,
    pub max_articles_per_page: usize,
    pub duplicate_early_exit: u32,
    pub navigation_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub render_settle_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("browserless_url", &self.browserless_url)
            .field(
                "browserless_token",
                &self.browserless_token.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("keywords_path", &self.keywords_path)
            .field("rate_limit_secs", &self.rate_limit_secs)
            .field("max_articles_per_page", &self.max_articles_per_page)
            .field("duplicate_early_exit", &self.duplicate_early_exit)
            .field("navigation_timeout_secs", &self.navigation_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("render_settle_ms", &self.render_settle_ms)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
