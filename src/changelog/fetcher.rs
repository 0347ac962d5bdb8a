//! HTTP plumbing shared by the per-ecosystem changelog strategies

use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::changelog::error::ChangelogError;
use crate::changelog::github;
use crate::parser::types::RegistryType;
use crate::version::registries::build_http_client;

/// Changelog file names probed at a repository root, most common first
pub const CHANGELOG_FILE_NAMES: [&str; 6] = [
    "CHANGELOG.md",
    "changelog.md",
    "CHANGES.md",
    "changes.md",
    "HISTORY.md",
    "history.md",
];

/// Base URLs for every host the resolver talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEndpoints {
    pub npm_registry: String,
    pub pypi: String,
    pub rubygems: String,
    /// Raw file mirror of GitHub repositories
    pub github_raw: String,
    pub github_api: String,
}

impl Default for ChangelogEndpoints {
    fn default() -> Self {
        Self {
            npm_registry: "https://registry.npmjs.org".to_string(),
            pypi: "https://pypi.org".to_string(),
            rubygems: "https://rubygems.org".to_string(),
            github_raw: "https://raw.githubusercontent.com".to_string(),
            github_api: "https://api.github.com".to_string(),
        }
    }
}

impl ChangelogEndpoints {
    /// Point every endpoint at one server. Used with a mock server.
    pub fn single_host(base_url: &str) -> Self {
        Self {
            npm_registry: base_url.to_string(),
            pypi: base_url.to_string(),
            rubygems: base_url.to_string(),
            github_raw: base_url.to_string(),
            github_api: base_url.to_string(),
        }
    }
}

/// Fetches changelog text from package registries and GitHub
#[derive(Clone)]
pub struct ChangelogFetcher {
    pub(super) client: reqwest::Client,
    pub(super) endpoints: ChangelogEndpoints,
    /// `github.com/owner/repo/releases/tag/<tag>`
    pub(super) release_tag_re: Regex,
    /// Level-one Markdown heading inside a long description
    pub(super) heading_re: Regex,
}

impl ChangelogFetcher {
    pub fn new(endpoints: ChangelogEndpoints) -> Self {
        Self {
            client: build_http_client(),
            endpoints,
            release_tag_re: Regex::new(r"github\.com/([^/]+/[^/]+)/releases/tag/(.+)")
                .unwrap(),
            heading_re: Regex::new(r"\n#\s").unwrap(),
        }
    }

    pub fn endpoints(&self) -> &ChangelogEndpoints {
        &self.endpoints
    }

    /// Run the strategy for `registry_type`.
    ///
    /// `Err` means the package metadata itself could not be read;
    /// `Ok(None)` means every source was tried without finding content.
    pub async fn fetch(
        &self,
        registry_type: RegistryType,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, ChangelogError> {
        match registry_type {
            RegistryType::Npm => self.fetch_npm(name, version).await,
            RegistryType::PyPI => self.fetch_pypi(name, version).await,
            RegistryType::RubyGems => self.fetch_rubygems(name, version).await,
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ChangelogError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChangelogError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ChangelogError> {
        self.get(url)
            .await?
            .json()
            .await
            .map_err(|e| ChangelogError::InvalidResponse {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    pub(super) async fn get_text(&self, url: &str) -> Result<String, ChangelogError> {
        Ok(self.get(url).await?.text().await?)
    }

    /// Fetch `url` as text; failures and blank bodies are a miss
    pub(super) async fn try_text(&self, url: &str) -> Option<String> {
        match self.get_text(url).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                debug!("Empty changelog body at {}", url);
                None
            }
            Err(e) => {
                debug!("Changelog candidate failed: {}", e);
                None
            }
        }
    }

    /// Try each of `file_names` at the root of a GitHub repository
    pub(super) async fn probe_repository(
        &self,
        repository_url: &str,
        file_names: &[&str],
    ) -> Option<String> {
        let Some(slug) = github::repo_slug(repository_url) else {
            debug!("Not a GitHub repository: {}", repository_url);
            return None;
        };

        for file_name in file_names {
            let url = github::raw_file_url(&self.endpoints.github_raw, &slug, file_name);
            if let Some(text) = self.try_text(&url).await {
                debug!("Found changelog at {}", url);
                return Some(text);
            }
        }

        None
    }
}
