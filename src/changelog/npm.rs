//! npm changelog strategy
//!
//! 1. A `changelog` URL declared on the version entry
//! 2. Changelog files at the root of the declared GitHub repository

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::changelog::error::ChangelogError;
use crate::changelog::fetcher::{CHANGELOG_FILE_NAMES, ChangelogFetcher};
use crate::changelog::github;
use crate::version::registries::NpmRegistry;

/// Full package document from the npm registry
#[derive(Debug, Deserialize)]
struct NpmPackument {
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
    #[serde(default)]
    repository: Option<serde_json::Value>,
}

/// `repository` is either a URL string or an object with a `url` field
fn repository_url(value: &serde_json::Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("url").and_then(|url| url.as_str()))
        .filter(|url| !url.is_empty())
}

impl ChangelogFetcher {
    pub(super) async fn fetch_npm(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, ChangelogError> {
        let url = format!(
            "{}/{}",
            self.endpoints.npm_registry,
            NpmRegistry::encode_package_name(name)
        );
        let packument: NpmPackument = self.get_json(&url).await?;

        let version_entry = packument.versions.get(version);

        if let Some(changelog_url) = version_entry
            .and_then(|entry| entry.get("changelog"))
            .and_then(|changelog| changelog.as_str())
        {
            debug!("Using declared changelog for {}@{}", name, version);
            if let Some(text) = self.try_text(changelog_url).await {
                return Ok(Some(text));
            }
        }

        let repository = version_entry
            .and_then(|entry| entry.get("repository"))
            .and_then(repository_url)
            .or_else(|| packument.repository.as_ref().and_then(repository_url));

        let Some(repository) = repository else {
            debug!("No repository declared for {}", name);
            return Ok(None);
        };

        let repository = github::normalize_repository_url(repository);
        Ok(self
            .probe_repository(&repository, &CHANGELOG_FILE_NAMES)
            .await)
    }
}
