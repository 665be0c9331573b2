//! Package search API (`/query?q=packageid:{name}`) implementation

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registries::{ensure_success, registry_url};
use crate::version::registry::Registry;
use crate::version::types::RegistryPackage;

/// Default base URL for the package search API
pub const DEFAULT_BASE_URL: &str = "https://api-v2v3search-0.nuget.org";

/// Response from the search API
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPackage {
    id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    license_url: Option<String>,
    #[serde(default)]
    versions: Vec<SearchPackageVersion>,
}

#[derive(Debug, Deserialize)]
struct SearchPackageVersion {
    version: String,
}

impl From<SearchPackage> for RegistryPackage {
    fn from(package: SearchPackage) -> Self {
        RegistryPackage {
            id: package.id,
            current_version: package.version,
            license_url: package.license_url,
            versions: package.versions.into_iter().map(|v| v.version).collect(),
        }
    }
}

/// Registry implementation for the package search API
pub struct SearchQueryRegistry {
    client: Client,
    base_url: String,
}

impl SearchQueryRegistry {
    /// Creates a new SearchQueryRegistry sharing the given client
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for SearchQueryRegistry {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn fetch_package(&self, package_name: &str) -> Result<RegistryPackage, RegistryError> {
        let query = format!("packageid:{}", package_name);
        let url = registry_url(&self.base_url, &["query"], &[("q", query.as_str())])?;
        debug!("Querying search registry: {}", url);

        let response = self.client.get(url).send().await?;

        ensure_success(&response, package_name)?;

        let search: SearchResponse = response.json().await.map_err(|e| {
            debug!("Failed to parse search registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let mut data = search.data;
        if data.is_empty() {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        // Prefer the exact id; the search may also return similarly named packages
        let index = data
            .iter()
            .position(|p| p.id.eq_ignore_ascii_case(package_name))
            .unwrap_or(0);

        Ok(data.swap_remove(index).into())
    }
}
