//! Fetch orchestrator
//!
//! Combines the roster cache, a [`RosterSource`] and the normalizer into the
//! single "get current users" operation. Upstream failures never reach the
//! caller: they resolve to the last known roster, or to an empty one.

use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::{RosterCache, DEFAULT_MAX_AGE_MINUTES};
use crate::data::{normalize, RosterSource, UserRecord};

/// Which branch produced the returned roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from a cache entry still inside the freshness window
    Cached,
    /// Fetched from the API and stored in the cache
    Fresh,
    /// Fetch failed; served an expired cache entry
    Stale,
    /// Fetch failed and nothing was cached
    Empty,
}

/// Fetches users through the cache
pub struct UserFetcher<S> {
    source: S,
    max_age: Duration,
}

impl<S: RosterSource> UserFetcher<S> {
    /// Creates a fetcher with the default 30 minute freshness window
    pub fn new(source: S) -> Self {
        Self::with_max_age(source, Duration::minutes(DEFAULT_MAX_AGE_MINUTES))
    }

    pub fn with_max_age(source: S, max_age: Duration) -> Self {
        Self { source, max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Returns the current users
    pub async fn fetch_users(&self, cache: &mut RosterCache) -> Vec<UserRecord> {
        self.fetch_users_with_outcome(cache).await.0
    }

    /// Returns the current users and the branch that produced them
    ///
    /// # Behavior
    /// - Fresh cache entry: returned as-is, the source is not called
    /// - Otherwise the source is called; on success the normalized roster is
    ///   cached and returned
    /// - On failure the previous entry is returned regardless of age, or an
    ///   empty roster if there is none
    pub async fn fetch_users_with_outcome(
        &self,
        cache: &mut RosterCache,
    ) -> (Vec<UserRecord>, FetchOutcome) {
        if cache.is_valid(self.max_age) {
            if let Some(entry) = cache.get() {
                debug!(count = entry.data.len(), fetched_at = %entry.fetched_at, "serving cached roster");
                return (entry.data.clone(), FetchOutcome::Cached);
            }
        }

        match self.source.fetch_raw().await {
            Ok(raw) => {
                let users = normalize(&raw);
                info!(received = raw.len(), enabled = users.len(), "roster refreshed");
                cache.put(users.clone());
                (users, FetchOutcome::Fresh)
            }
            Err(e) => match cache.get() {
                Some(entry) => {
                    warn!(
                        error = %e,
                        fetched_at = %entry.fetched_at,
                        count = entry.data.len(),
                        "roster fetch failed, serving stale cache"
                    );
                    (entry.data.clone(), FetchOutcome::Stale)
                }
                None => {
                    error!(error = %e, "roster fetch failed and no cached roster is available");
                    (Vec::new(), FetchOutcome::Empty)
                }
            },
        }
    }
}
