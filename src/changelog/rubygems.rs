//! RubyGems changelog strategy
//!
//! 1. `metadata.changelog_uri`: a GitHub release page is read through the
//!    releases API, anything else is fetched as text
//! 2. Changelog files at the root of `metadata.source_code_uri`

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::changelog::error::ChangelogError;
use crate::changelog::fetcher::{CHANGELOG_FILE_NAMES, ChangelogFetcher};
use crate::changelog::github;

#[derive(Debug, Deserialize)]
struct GemVersionResponse {
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl GemVersionResponse {
    fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    #[serde(default)]
    body: Option<String>,
}

impl ChangelogFetcher {
    pub(super) async fn fetch_rubygems(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, ChangelogError> {
        let url = format!(
            "{}/api/v2/rubygems/{}/versions/{}.json",
            self.endpoints.rubygems,
            name,
            version.trim()
        );
        let gem: GemVersionResponse = self.get_json(&url).await?;

        if let Some(changelog_uri) = gem.metadata("changelog_uri")
            && let Some(text) = self.fetch_changelog_uri(changelog_uri).await
        {
            return Ok(Some(text));
        }

        let Some(source_code_uri) = gem.metadata("source_code_uri") else {
            debug!("No source code URI for gem {}", name);
            return Ok(None);
        };

        Ok(self
            .probe_repository(source_code_uri, &CHANGELOG_FILE_NAMES)
            .await)
    }

    async fn fetch_changelog_uri(&self, changelog_uri: &str) -> Option<String> {
        let release_api_url = self.release_tag_re.captures(changelog_uri).map(|caps| {
            github::release_api_url(&self.endpoints.github_api, &caps[1], &caps[2])
        });
        if let Some(api_url) = release_api_url {
            return match self.get_json::<GithubRelease>(&api_url).await {
                Ok(release) => {
                    let body = release.body.filter(|body| !body.trim().is_empty());
                    if body.is_none() {
                        warn!("Release has no notes: {}", changelog_uri);
                    }
                    body
                }
                Err(e) => {
                    debug!("Release lookup failed: {}", e);
                    None
                }
            };
        }

        let url = github::blob_to_raw_url(&self.endpoints.github_raw, changelog_uri)
            .unwrap_or_else(|| changelog_uri.to_string());
        self.try_text(&url).await
    }
}
