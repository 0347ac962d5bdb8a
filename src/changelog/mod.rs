//! Changelog resolution for the hover
//!
//! [`ChangelogResolver::resolve`] consults the cache, picks the registry
//! strategy from the manifest file name and stores whatever it finds.
//! Every failure below the resolver reads as "no changelog".

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod github;
mod npm;
mod pypi;
mod rubygems;

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::config::CHANGELOG_CACHE_TTL_SECS;
use crate::parser::types::RegistryType;

pub use cache::{CacheEntry, ChangelogCache};
pub use error::ChangelogError;
pub use fetcher::{ChangelogEndpoints, ChangelogFetcher};

pub struct ChangelogResolver {
    fetcher: ChangelogFetcher,
    cache: ChangelogCache,
    cache_enabled: AtomicBool,
}

impl ChangelogResolver {
    pub fn new(endpoints: ChangelogEndpoints) -> Self {
        Self::with_ttl(endpoints, Duration::seconds(CHANGELOG_CACHE_TTL_SECS))
    }

    pub fn with_ttl(endpoints: ChangelogEndpoints, ttl: Duration) -> Self {
        Self {
            fetcher: ChangelogFetcher::new(endpoints),
            cache: ChangelogCache::new(ttl),
            cache_enabled: AtomicBool::new(true),
        }
    }

    pub fn set_cache_enabled(&self, enabled: bool) {
        self.cache_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled.load(Ordering::Relaxed)
    }

    pub fn cache(&self) -> &ChangelogCache {
        &self.cache
    }

    /// Changelog text for `name@version`.
    ///
    /// `file_hint` is the manifest path or file name and selects the
    /// registry. Returns `None` when the hint is unsupported or no source
    /// yields content.
    pub async fn resolve(&self, name: &str, version: &str, file_hint: &str) -> Option<String> {
        let key = ChangelogCache::key(name, version);

        if self.cache_enabled()
            && let Some(content) = self.cache.get(&key, Utc::now())
        {
            debug!("Changelog cache hit for {}", key);
            return Some(content);
        }

        let Some(registry_type) = RegistryType::from_changelog_hint(file_hint) else {
            warn!("Unsupported file type for changelog: {}", file_hint);
            return None;
        };

        let changelog = match self.fetcher.fetch(registry_type, name, version).await {
            Ok(changelog) => changelog,
            Err(e) => {
                error!("Failed to fetch changelog for {}: {}", key, e);
                return None;
            }
        };

        let Some(content) = changelog else {
            warn!("No changelog found for {}", key);
            return None;
        };

        info!(
            "Fetched changelog for {} from {}",
            key,
            registry_type.as_str()
        );
        if self.cache_enabled() {
            self.cache.insert(key, content.clone(), Utc::now());
        }

        Some(content)
    }
}

impl Default for ChangelogResolver {
    fn default() -> Self {
        Self::new(ChangelogEndpoints::default())
    }
}
