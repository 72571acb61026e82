//! Token revocation list.
//!
//! A revoked token is recorded as `revoked:<token>` with a sentinel value and
//! a TTL matching the lifetime of its kind, so entries disappear on their own
//! once the token could no longer validate anyway.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use certitrack_core::result::AppResult;
use certitrack_core::traits::cache::CacheProvider;

use crate::provider::CacheManager;

const KEY_PREFIX: &str = "revoked:";
const SENTINEL: &str = "1";

/// Revocation list backed by the shared cache.
#[derive(Debug, Clone)]
pub struct RevocationStore {
    cache: Arc<CacheManager>,
}

impl RevocationStore {
    /// Create a store over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Mark `token` as unusable for `ttl`. Revoking twice is not an error.
    pub async fn revoke(&self, token: &str, ttl: Duration) -> AppResult<()> {
        self.cache.set(&Self::key(token), SENTINEL, ttl).await?;
        debug!(ttl_secs = ttl.as_secs(), "Token revoked");
        Ok(())
    }

    /// Revoke `token` only if it is not already revoked.
    ///
    /// Returns `true` for the single caller that performed the revocation,
    /// which makes this the consume step for single-use tokens: of several
    /// concurrent claims on the same token, exactly one wins.
    pub async fn claim(&self, token: &str, ttl: Duration) -> AppResult<bool> {
        let claimed = self
            .cache
            .set_if_absent(&Self::key(token), SENTINEL, ttl)
            .await?;
        debug!(claimed, ttl_secs = ttl.as_secs(), "Token claim");
        Ok(claimed)
    }

    /// Whether `token` is currently revoked.
    ///
    /// Cache failures are returned as errors, never as `false`; callers must
    /// treat them as a rejection.
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        self.cache.exists(&Self::key(token)).await
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }
}
