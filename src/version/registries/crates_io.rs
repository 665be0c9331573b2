//! crates.io registry API implementation

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registries::{ensure_success, registry_url};
use crate::version::registry::Registry;
use crate::version::types::RegistryPackage;

/// Default base URL for crates.io
pub const DEFAULT_BASE_URL: &str = "https://crates.io";

/// Response from crates.io API
#[derive(Debug, Deserialize)]
struct CratesIoResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
    versions: Vec<CrateVersion>,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    id: String,
    #[serde(default)]
    max_version: String,
}

#[derive(Debug, Deserialize)]
struct CrateVersion {
    num: String,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    yanked: bool,
}

/// Registry implementation for crates.io API
pub struct CratesIoRegistry {
    client: Client,
    base_url: String,
}

impl CratesIoRegistry {
    /// Creates a new CratesIoRegistry sharing the given client
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for CratesIoRegistry {
    fn name(&self) -> &'static str {
        "crates_io"
    }

    async fn fetch_package(&self, package_name: &str) -> Result<RegistryPackage, RegistryError> {
        let url = registry_url(&self.base_url, &["api", "v1", "crates", package_name], &[])?;
        debug!("Fetching crate: {}", url);

        let response = self.client.get(url).send().await?;

        ensure_success(&response, package_name)?;

        let body: CratesIoResponse = response.json().await.map_err(|e| {
            debug!("Failed to parse crates.io response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // License of the advertised max version, else of the newest listed one
        let license_url = body
            .versions
            .iter()
            .find(|v| v.num == body.krate.max_version)
            .or_else(|| body.versions.first())
            .and_then(|v| v.license.clone());

        let versions = body
            .versions
            .into_iter()
            .filter(|v| !v.yanked)
            .map(|v| v.num)
            .collect();

        Ok(RegistryPackage {
            id: body.krate.id,
            current_version: body.krate.max_version,
            license_url,
            versions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_package_skips_yanked_versions() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/api/v1/crates/serde")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "crate": { "id": "serde", "max_version": "1.0.200" },
                    "versions": [
                        { "num": "1.0.201", "license": "MIT OR Apache-2.0", "yanked": true },
                        { "num": "1.0.200", "license": "MIT OR Apache-2.0", "yanked": false },
                        { "num": "1.0.100", "license": "MIT/Apache-2.0", "yanked": false }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let registry = CratesIoRegistry::new(Client::new(), &server.url());
        let result = registry.fetch_package("serde").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            RegistryPackage {
                id: "serde".to_string(),
                current_version: "1.0.200".to_string(),
                license_url: Some("MIT OR Apache-2.0".to_string()),
                versions: vec!["1.0.200".to_string(), "1.0.100".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn fetch_package_escapes_name_as_single_path_segment() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/api/v1/crates/evil%2F..%3Fx")
            .with_status(404)
            .create_async()
            .await;

        let registry = CratesIoRegistry::new(Client::new(), &server.url());
        let result = registry.fetch_package("evil/..?x").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_package_returns_not_found_for_nonexistent_crate() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/api/v1/crates/nonexistent-crate")
            .with_status(404)
            .with_body(r#"{"errors":[{"detail":"Not Found"}]}"#)
            .create_async()
            .await;

        let registry = CratesIoRegistry::new(Client::new(), &server.url());
        let result = registry.fetch_package("nonexistent-crate").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_package_returns_rate_limited_with_retry_after() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/api/v1/crates/tokio")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let registry = CratesIoRegistry::new(Client::new(), &server.url());
        let result = registry.fetch_package("tokio").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::RateLimited {
                retry_after_secs: Some(30)
            })
        ));
    }
}
