//! In-memory cache for the user roster
//!
//! Holds the most recent normalized roster together with the time it was
//! fetched. Entries never expire on their own: a stale entry is still handed
//! out so callers can fall back to it when the API is unavailable.

mod store;

pub use store::{is_valid, CachedRoster, RosterCache, DEFAULT_MAX_AGE_MINUTES};
