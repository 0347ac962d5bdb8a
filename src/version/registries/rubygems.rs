//! RubyGems registry client
//!
//! The latest version is the flat `version` field of `/api/v1/gems/{gem}.json`.

use serde::Deserialize;

use crate::parser::types::RegistryType;
use crate::version::error::RegistryError;
use crate::version::registries::{build_http_client, fetch_json};
use crate::version::registry::Registry;

const DEFAULT_RUBYGEMS_REGISTRY: &str = "https://rubygems.org";

#[derive(Debug, Deserialize)]
struct GemInfo {
    version: String,
}

#[derive(Clone)]
pub struct RubyGemsRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl RubyGemsRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_http_client(),
            base_url: base_url.into(),
        }
    }
}

impl Default for RubyGemsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_RUBYGEMS_REGISTRY)
    }
}

#[async_trait::async_trait]
impl Registry for RubyGemsRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::RubyGems
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let url = format!("{}/api/v1/gems/{}.json", self.base_url, package_name);
        let gem: GemInfo = fetch_json(&self.client, &url, package_name).await?;
        Ok(gem.version)
    }
}
