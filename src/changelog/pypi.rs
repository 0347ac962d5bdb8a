//! PyPI changelog strategy
//!
//! 1. A project URL labelled as a changelog, unless it points at general docs
//! 2. Changelog files at the root of the GitHub repository
//! 3. A changelog-like section of the long description

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::changelog::error::ChangelogError;
use crate::changelog::fetcher::{CHANGELOG_FILE_NAMES, ChangelogFetcher};

/// Project URL labels checked for a changelog link, in priority order
const CHANGELOG_URL_LABELS: [&str; 4] = ["Changelog", "Changes", "Release Notes", "History"];

/// Project URL labels that may point at the source repository
const REPOSITORY_URL_LABELS: [&str; 2] = ["Homepage", "Source"];

/// Keywords that open a changelog section in a long description
const DESCRIPTION_KEYWORDS: [&str; 5] = [
    "changelog",
    "changes",
    "history",
    "what's new",
    "release notes",
];

#[derive(Debug, Deserialize)]
struct PypiReleaseResponse {
    info: PypiReleaseInfo,
}

#[derive(Debug, Deserialize)]
struct PypiReleaseInfo {
    #[serde(default)]
    project_urls: Option<HashMap<String, String>>,
    #[serde(default)]
    home_page: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl PypiReleaseInfo {
    fn project_url(&self, label: &str) -> Option<&str> {
        self.project_urls
            .as_ref()?
            .get(label)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    fn changelog_urls(&self) -> impl Iterator<Item = &str> {
        CHANGELOG_URL_LABELS
            .iter()
            .filter_map(|label| self.project_url(label))
            .filter(|url| !is_documentation_url(url))
    }

    fn github_repository(&self) -> Option<&str> {
        let home_page = self.home_page.as_deref().filter(|url| !url.is_empty());

        home_page
            .into_iter()
            .chain(
                REPOSITORY_URL_LABELS
                    .iter()
                    .filter_map(|label| self.project_url(label)),
            )
            .find(|url| url.contains("github.com"))
    }
}

fn is_documentation_url(url: &str) -> bool {
    url.contains("docs.") || url.contains("/docs/")
}

impl ChangelogFetcher {
    /// Cut the description from the first changelog keyword up to the next
    /// level-one heading.
    fn changelog_section(&self, description: &str) -> Option<String> {
        let lowered = description.to_ascii_lowercase();
        let start = DESCRIPTION_KEYWORDS
            .iter()
            .find_map(|keyword| lowered.find(keyword))?;

        let section = &description[start..];
        let section = self
            .heading_re
            .split(section)
            .next()
            .unwrap_or(section)
            .trim_end();

        (!section.is_empty()).then(|| section.to_string())
    }

    pub(super) async fn fetch_pypi(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>, ChangelogError> {
        let url = format!("{}/pypi/{}/{}/json", self.endpoints.pypi, name, version);
        let release: PypiReleaseResponse = self.get_json(&url).await?;
        let info = release.info;

        for changelog_url in info.changelog_urls() {
            if let Some(text) = self.try_text(changelog_url).await {
                debug!("Using project URL changelog for {}", name);
                return Ok(Some(text));
            }
        }

        if let Some(repository) = info.github_repository() {
            let file_names: Vec<&str> = CHANGELOG_FILE_NAMES
                .iter()
                .copied()
                .chain(["CHANGELOG.rst", "changelog.rst"])
                .collect();
            if let Some(text) = self.probe_repository(repository, &file_names).await {
                return Ok(Some(text));
            }
        }

        Ok(info
            .description
            .as_deref()
            .and_then(|description| self.changelog_section(description)))
    }
}
