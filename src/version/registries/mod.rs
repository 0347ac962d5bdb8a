//! Registry implementations for fetching package versions
//!
//! Every client is one GET against a JSON endpoint; [`fetch_json`] holds the
//! status handling they share.

pub mod npm;
pub mod pypi;
pub mod rubygems;

pub use npm::NpmRegistry;
pub use pypi::PypiRegistry;
pub use rubygems::RubyGemsRegistry;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::version::error::RegistryError;

/// User agent sent with every registry and changelog request
pub const USER_AGENT: &str = concat!("version-lens/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by a registry implementation
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

/// GET `url` and decode the JSON body.
/// A 404 means the package does not exist.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    package_name: &str,
) -> Result<T, RegistryError> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(RegistryError::NotFound(package_name.to_string()));
    }
    if !status.is_success() {
        warn!("{} returned status {}", url, status);
        return Err(RegistryError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RegistryError::InvalidResponse(format!("Malformed body from {}: {}", url, e)))
}
