//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use version_lens::changelog::{ChangelogEndpoints, ChangelogResolver};
use version_lens::parser::types::RegistryType;
use version_lens::version::error::RegistryError;
use version_lens::version::registry::Registry;

/// Mock registry for testing
pub struct MockRegistry {
    registry_type: RegistryType,
    latest: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockRegistry {
    pub fn new(registry_type: RegistryType) -> Self {
        Self {
            registry_type,
            latest: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_latest(mut self, package: &str, version: &str) -> Self {
        self.latest
            .insert(package.to_string(), version.to_string());
        self
    }

    /// Counter of lookups, shared with the registry once it is moved away
    #[allow(dead_code)]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.latest.get(package_name) {
            Some(version) => Ok(version.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Registry whose every lookup fails like a dropped connection
#[allow(dead_code)]
pub struct FailingRegistry(pub RegistryType);

#[async_trait]
impl Registry for FailingRegistry {
    fn registry_type(&self) -> RegistryType {
        self.0
    }

    async fn fetch_latest_version(&self, _package_name: &str) -> Result<String, RegistryError> {
        Err(RegistryError::InvalidResponse(
            "connection reset by peer".to_string(),
        ))
    }
}

/// Registry whose first lookup waits until the gate is opened
#[allow(dead_code)]
pub struct GatedRegistry {
    inner: MockRegistry,
    entered: Arc<Notify>,
    gate: Arc<Notify>,
    held: AtomicBool,
}

#[allow(dead_code)]
impl GatedRegistry {
    pub fn new(inner: MockRegistry) -> Self {
        Self {
            inner,
            entered: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
            held: AtomicBool::new(false),
        }
    }

    /// Notified when the first lookup starts waiting
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    /// Releases the first lookup
    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(&self.gate)
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.inner.calls()
    }
}

#[async_trait]
impl Registry for GatedRegistry {
    fn registry_type(&self) -> RegistryType {
        self.inner.registry_type()
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        if !self.held.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        self.inner.fetch_latest_version(package_name).await
    }
}

/// Registries map holding `registry` under its own type
pub fn registries_with(
    registry: impl Registry + 'static,
) -> HashMap<RegistryType, Arc<dyn Registry>> {
    let registry: Arc<dyn Registry> = Arc::new(registry);
    HashMap::from([(registry.registry_type(), registry)])
}

/// Changelog resolver pointed at an unreachable host
#[allow(dead_code)]
pub fn offline_changelog() -> ChangelogResolver {
    ChangelogResolver::new(ChangelogEndpoints::single_host("http://127.0.0.1:9"))
}
