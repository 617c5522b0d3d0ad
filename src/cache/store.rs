//! Cache store holding a single roster snapshot
//!
//! Created once at startup and passed by reference to the fetch
//! orchestrator. Lives for the whole process; nothing is written to disk.

use chrono::{DateTime, Duration, Utc};

use crate::data::UserRecord;

/// Default freshness window in minutes
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 30;

/// A roster snapshot and the moment it was fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRoster {
    /// The normalized records
    pub data: Vec<UserRecord>,
    /// When the records were stored
    pub fetched_at: DateTime<Utc>,
}

impl CachedRoster {
    /// Age of the snapshot relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }
}

/// Returns true if `entry` holds data younger than `max_age` at `now`
///
/// The boundary is exclusive: an entry exactly `max_age` old is stale.
pub fn is_valid(entry: Option<&CachedRoster>, max_age: Duration, now: DateTime<Utc>) -> bool {
    match entry {
        Some(entry) => entry.age(now) < max_age,
        None => false,
    }
}

/// Process-wide roster cache
///
/// Data and timestamp are replaced together by [`RosterCache::put`]; the cache
/// is either empty or holds both.
#[derive(Debug, Default)]
pub struct RosterCache {
    entry: Option<CachedRoster>,
}

impl RosterCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current entry, fresh or not
    pub fn get(&self) -> Option<&CachedRoster> {
        self.entry.as_ref()
    }

    /// Replaces the entry, stamping it with the current time
    pub fn put(&mut self, records: Vec<UserRecord>) {
        self.put_at(records, Utc::now());
    }

    /// Replaces the entry with an explicit fetch time
    pub fn put_at(&mut self, records: Vec<UserRecord>, fetched_at: DateTime<Utc>) {
        self.entry = Some(CachedRoster {
            data: records,
            fetched_at,
        });
    }

    /// Whether the current entry is younger than `max_age`
    pub fn is_valid(&self, max_age: Duration) -> bool {
        is_valid(self.get(), max_age, Utc::now())
    }
}
