//! Keyword relevance filter for ambiguous ticker symbols.
//!
//! Some IDX tickers collide with everyday Indonesian words (BUMI is
//! "earth", BUKA is "open"), so their tag pages collect plenty of news that
//! has nothing to do with the listed company. Only those symbols are
//! filtered; everything else passes unconditionally.

use crate::lexicon::Lexicon;

/// Tickers that collide with common-language words.
static AMBIGUOUS_SYMBOLS: &[&str] = &["BUMI", "BUKA", "DEWA", "GOTO", "BBHI"];

#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    lexicon: Lexicon,
}

impl RelevanceFilter {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Decide whether an article is about the listed company.
    ///
    /// Rules, applied to the lowercased title + summary:
    /// 1. Non-ambiguous symbol → keep.
    /// 2. A negative keyword present and no positive keyword → discard.
    /// 3. A negative keyword present but a positive keyword too → keep
    ///    (market context rescues the match).
    /// 4. No negative keyword → keep.
    #[must_use]
    pub fn is_relevant(&self, title: &str, summary: Option<&str>, symbol: &str) -> bool {
        if !AMBIGUOUS_SYMBOLS.contains(&symbol) {
            return true;
        }

        let text = format!("{} {}", title, summary.unwrap_or("")).to_lowercase();

        let has_negative = self.lexicon.negative.iter().any(|w| text.contains(w));
        if has_negative {
            return self.lexicon.positive.iter().any(|w| text.contains(w));
        }

        true
    }
}
