//! PyPI registry client
//!
//! The latest version is `info.version` of the project JSON document.

use serde::Deserialize;

use crate::parser::types::RegistryType;
use crate::version::error::RegistryError;
use crate::version::registries::{build_http_client, fetch_json};
use crate::version::registry::Registry;

const DEFAULT_PYPI_REGISTRY: &str = "https://pypi.org";

#[derive(Debug, Deserialize)]
struct ProjectDocument {
    info: ProjectInfo,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    version: String,
}

#[derive(Clone)]
pub struct PypiRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PypiRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_http_client(),
            base_url: base_url.into(),
        }
    }
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PYPI_REGISTRY)
    }
}

#[async_trait::async_trait]
impl Registry for PypiRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::PyPI
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_name);
        let document: ProjectDocument = fetch_json(&self.client, &url, package_name).await?;
        Ok(document.info.version)
    }
}
