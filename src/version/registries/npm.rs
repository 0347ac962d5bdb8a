//! npm registry client
//!
//! The latest version is the `latest` dist-tag of the package document.

use serde::Deserialize;

use crate::parser::types::RegistryType;
use crate::version::error::RegistryError;
use crate::version::registries::{build_http_client, fetch_json};
use crate::version::registry::Registry;

const DEFAULT_NPM_REGISTRY: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct Packument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: DistTags,
}

#[derive(Debug, Default, Deserialize)]
struct DistTags {
    latest: Option<String>,
}

#[derive(Clone)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_http_client(),
            base_url: base_url.into(),
        }
    }

    /// `@scope/name` becomes `@scope%2Fname`; unscoped names pass through
    pub fn encode_package_name(package_name: &str) -> String {
        match package_name.strip_prefix('@') {
            Some(scoped) => format!("@{}", scoped.replacen('/', "%2F", 1)),
            None => package_name.to_string(),
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NPM_REGISTRY)
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::Npm
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let url = format!(
            "{}/{}",
            self.base_url,
            Self::encode_package_name(package_name)
        );
        let packument: Packument = fetch_json(&self.client, &url, package_name).await?;

        packument.dist_tags.latest.ok_or_else(|| {
            RegistryError::InvalidResponse(format!("No latest dist-tag for {}", package_name))
        })
    }
}
