//! GitHub URL helpers for changelog discovery

/// Branch probed on the raw-content mirror
pub const DEFAULT_BRANCH: &str = "master";

/// Normalize a repository URL as declared in package metadata into an
/// HTTPS URL.
///
/// Handles `git+https://…`, `git://…`, `ssh://git@…`, `git@github.com:owner/repo`,
/// the npm `github:owner/repo` shorthand and trailing `.git`.
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);

    let url = if let Some(rest) = url.strip_prefix("git@github.com:") {
        format!("https://github.com/{}", rest)
    } else if let Some(rest) = url.strip_prefix("ssh://git@") {
        format!("https://{}", rest)
    } else if let Some(rest) = url.strip_prefix("git://") {
        format!("https://{}", rest)
    } else if let Some(rest) = url.strip_prefix("github:") {
        format!("https://github.com/{}", rest)
    } else {
        url.to_string()
    };

    let url = url.replacen("github.com:", "github.com/", 1);
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Extract `owner/repo` from a GitHub URL. Returns `None` for other hosts.
pub fn repo_slug(url: &str) -> Option<String> {
    let normalized = normalize_repository_url(url);
    let (_, path) = normalized.split_once("github.com/")?;
    let path = path.split(['#', '?']).next().unwrap_or(path);

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    Some(format!("{}/{}", owner, repo))
}

/// URL of `file_name` at the default branch on the raw-content mirror
pub fn raw_file_url(raw_base: &str, slug: &str, file_name: &str) -> String {
    format!("{}/{}/{}/{}", raw_base, slug, DEFAULT_BRANCH, file_name)
}

/// Rewrite `github.com/owner/repo/blob/<ref>/<path>` to the raw-content mirror
pub fn blob_to_raw_url(raw_base: &str, url: &str) -> Option<String> {
    let (_, path) = url.split_once("github.com/")?;
    let mut parts = path.splitn(4, '/');
    let owner = parts.next()?;
    let repo = parts.next()?;
    if parts.next()? != "blob" {
        return None;
    }
    let rest = parts.next()?;

    Some(format!("{}/{}/{}/{}", raw_base, owner, repo, rest))
}

/// Releases API URL of `tag` in the repository `slug`
pub fn release_api_url(api_base: &str, slug: &str, tag: &str) -> String {
    format!("{}/repos/{}/releases/tags/{}", api_base, slug, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("git+https://github.com/axios/axios.git", "https://github.com/axios/axios")]
    #[case("git://github.com/lodash/lodash.git", "https://github.com/lodash/lodash")]
    #[case("git@github.com:expressjs/express.git", "https://github.com/expressjs/express")]
    #[case("ssh://git@github.com/vuejs/core.git", "https://github.com/vuejs/core")]
    #[case("github:facebook/react", "https://github.com/facebook/react")]
    #[case("https://github.com/psf/requests/", "https://github.com/psf/requests")]
    #[case("https://gitlab.com/group/project.git", "https://gitlab.com/group/project")]
    fn normalize_repository_url_returns_https_url(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_repository_url(input), expected);
    }

    #[rstest]
    #[case("git+https://github.com/axios/axios.git", Some("axios/axios"))]
    #[case("https://github.com/rails/rails/tree/v7.1.3", Some("rails/rails"))]
    #[case("https://github.com/pypa/hatch#readme", Some("pypa/hatch"))]
    #[case("https://github.com/pallets/flask?tab=readme-ov-file", Some("pallets/flask"))]
    #[case("https://github.com/psf", None)]
    #[case("https://gitlab.com/group/project", None)]
    #[case("https://requests.readthedocs.io", None)]
    fn repo_slug_extracts_owner_and_repo(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(repo_slug(input).as_deref(), expected);
    }

    #[test]
    fn raw_file_url_targets_default_branch() {
        assert_eq!(
            raw_file_url("https://raw.githubusercontent.com", "axios/axios", "CHANGELOG.md"),
            "https://raw.githubusercontent.com/axios/axios/master/CHANGELOG.md"
        );
    }

    #[test]
    fn blob_to_raw_url_drops_blob_segment() {
        assert_eq!(
            blob_to_raw_url(
                "https://raw.githubusercontent.com",
                "https://github.com/rails/rails/blob/v7.1.3/activerecord/CHANGELOG.md"
            ),
            Some(
                "https://raw.githubusercontent.com/rails/rails/v7.1.3/activerecord/CHANGELOG.md"
                    .to_string()
            )
        );
        assert_eq!(
            blob_to_raw_url(
                "https://raw.githubusercontent.com",
                "https://github.com/rails/rails/releases"
            ),
            None
        );
    }

    #[test]
    fn release_api_url_targets_tag_endpoint() {
        assert_eq!(
            release_api_url("https://api.github.com", "puma/puma", "v6.4.2"),
            "https://api.github.com/repos/puma/puma/releases/tags/v6.4.2"
        );
    }
}
