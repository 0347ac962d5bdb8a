//! Registry trait for fetching the latest published version of a package

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::parser::types::RegistryType;
use crate::version::error::RegistryError;

/// Trait for fetching package versions from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the type of registry this implementation handles
    fn registry_type(&self) -> RegistryType;

    /// Fetches the latest published version of a package
    ///
    /// # Returns
    /// * `Ok(String)` - The version exactly as published
    /// * `Err(RegistryError)` - If the request or the response body fails
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}

/// Look up the latest version, turning every failure into `None`.
///
/// Errors are logged here and never reach the caller.
pub async fn lookup_latest_version(registry: &dyn Registry, package_name: &str) -> Option<String> {
    debug!(
        "Fetching latest version for {} package: {}",
        registry.registry_type().as_str(),
        package_name
    );

    match registry.fetch_latest_version(package_name).await {
        Ok(version) if version.is_empty() => {
            warn!(
                "{} returned an empty version for {}",
                registry.registry_type().as_str(),
                package_name
            );
            None
        }
        Ok(version) => Some(version),
        Err(e) => {
            warn!(
                "Failed to fetch latest version for {}/{}: {}",
                registry.registry_type().as_str(),
                package_name,
                e
            );
            None
        }
    }
}
