//! Canonical hashing with domain separation.
//!
//! **Exactly one place defines canonical hashing.** Every digest in the
//! workspace is `sha256(domain_prefix || data)` rendered as
//! `"sha256:<hex>"`.

use sha2::{Digest, Sha256};

/// Digest string tagged with its algorithm, e.g. `"sha256:9f86d0..."`.
///
/// Both the algorithm tag and the hex part are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// `None` unless `s` is `<algorithm>:<hex>` with both parts non-empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for search trace hashing.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"WAYPOINT::SEARCH_TRACE::V1\0";

/// Domain prefix for search report hashing.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"WAYPOINT::SEARCH_REPORT::V1\0";

/// Domain prefix for search policy hashing.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"WAYPOINT::SEARCH_POLICY::V1\0";

/// `sha256(domain || data)` as a [`ContentHash`].
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    ContentHash {
        full: format!("sha256:{digest}"),
        colon: "sha256".len(),
    }
}
