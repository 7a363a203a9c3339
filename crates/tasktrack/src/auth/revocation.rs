//! Server-side denylist of logged-out session tokens.

use dashmap::DashMap;

/// Token IDs revoked before their natural expiry.
///
/// Entries only need to live until the token would have expired anyway.
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<String, i64>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `token_id` until `expires_at`, dropping entries already past expiry.
    pub fn revoke(&self, token_id: &str, expires_at: i64, now: i64) {
        self.purge_expired(now);
        if expires_at >= now {
            self.entries.insert(token_id.to_string(), expires_at);
        }
    }

    pub fn is_revoked(&self, token_id: &str) -> bool {
        self.entries.contains_key(token_id)
    }

    pub fn purge_expired(&self, now: i64) {
        self.entries.retain(|_, expires_at| *expires_at >= now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
