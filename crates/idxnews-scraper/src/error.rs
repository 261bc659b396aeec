use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("browser endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("no page loaded: {0}")]
    NoPage(String),

    #[error("page not available for {url}: {reason}")]
    Navigation { url: String, reason: String },
}
