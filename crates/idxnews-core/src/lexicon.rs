//! Positive/negative keyword lists for the relevance filter.
//!
//! Loaded once at startup from a JSON file and injected into
//! [`crate::RelevanceFilter`]. A missing or malformed file degrades to an
//! empty lexicon, which makes the filter permissive rather than crashing
//! the scraper.

use std::path::Path;

use serde::Deserialize;

/// Keyword lists, lowercase, matched by substring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    /// Market-context words that rescue an otherwise noisy match.
    pub positive: Vec<String>,
    /// Common-language words signalling a false ticker match.
    pub negative: Vec<String>,
}

impl Lexicon {
    /// Load a lexicon from a JSON file.
    ///
    /// Any failure (missing file, bad JSON) is logged as a warning and
    /// yields [`Lexicon::default`], i.e. an always-permissive filter.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(lexicon) => {
                tracing::info!(
                    positive = lexicon.positive.len(),
                    negative = lexicon.negative.len(),
                    path = %path.display(),
                    "loaded keyword lexicon"
                );
                lexicon
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not load keyword lexicon; relevance filter will accept everything"
                );
                Lexicon::default()
            }
        }
    }

    fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// True when both lists are empty, i.e. the filter cannot reject anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
enum LexiconError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
