//! In-memory changelog cache with lazy expiry
//!
//! Entries are keyed by `name@version`. An entry older than the TTL reads as
//! a miss and is overwritten by the next successful fetch; nothing is ever
//! evicted in the background.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

pub struct ChangelogCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ChangelogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cache key for a package version
    pub fn key(name: &str, version: &str) -> String {
        format!("{}@{}", name, version)
    }

    // The guard is never held across an await, so a poisoned lock still
    // holds a consistent map.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Content for `key` if it was stored less than one TTL before `now`
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        (now - entry.fetched_at < self.ttl).then(|| entry.content.clone())
    }

    /// Store or overwrite the entry for `key`
    pub fn insert(&self, key: String, content: String, now: DateTime<Utc>) {
        self.lock_entries().insert(
            key,
            CacheEntry {
                content,
                fetched_at: now,
            },
        );
    }

    /// Raw entry regardless of age
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.lock_entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
