pub mod browserless;
pub mod error;
pub mod extract;
pub mod hash;
pub mod page;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use browserless::BrowserlessSession;
pub use error::ScraperError;
pub use extract::{extract_articles, CandidateOutcome, ExtractOptions, Extraction, SkipReason};
pub use hash::article_hash;
pub use page::{PageSession, ScrollTarget};
pub use runner::{resolve_tier, run_symbol, run_tier};
