//! Article identity hashing.

use sha2::{Digest, Sha256};

/// Identity hash of a canonical absolute article URL, as lowercase hex.
///
/// The hash is the deduplication key: two symbols discovering the same URL
/// produce the same hash.
#[must_use]
pub fn article_hash(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}
