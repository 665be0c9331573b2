//! Runtime release index client

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::registries::ensure_success;
use crate::version::registry::ReleaseIndex;
use crate::version::types::ReleaseEntry;

/// Default URL of the runtime release index
pub const DEFAULT_RELEASE_INDEX_URL: &str =
    "https://dotnetcli.blob.core.windows.net/dotnet/release-metadata/releases-index.json";

#[derive(Debug, Deserialize)]
struct ReleaseIndexResponse {
    #[serde(rename = "releases-index")]
    releases: Vec<ReleaseEntry>,
}

/// Fetches the list of release channels from a fixed URL
pub struct ReleaseIndexClient {
    client: Client,
    url: String,
}

impl ReleaseIndexClient {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ReleaseIndex for ReleaseIndexClient {
    async fn fetch_release_index(&self) -> Result<Vec<ReleaseEntry>, RegistryError> {
        debug!("Fetching release index: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        ensure_success(&response, &self.url)?;

        let index: ReleaseIndexResponse = response.json().await.map_err(|e| {
            debug!("Failed to parse release index: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        debug!("Release index lists {} channels", index.releases.len());

        Ok(index.releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::channel::select_latest;
    use crate::version::types::SupportPhase;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_release_index_returns_entries() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/releases-index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "releases-index": [
                        {
                            "channel-version": "9.0",
                            "latest-release": "9.0.4",
                            "latest-release-date": "2025-04-08",
                            "product": ".NET",
                            "support-phase": "active"
                        },
                        {
                            "channel-version": "8.0",
                            "latest-release": "8.0.15",
                            "latest-release-date": "2025-04-08",
                            "product": ".NET",
                            "support-phase": "lts"
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = ReleaseIndexClient::new(
            Client::new(),
            &format!("{}/releases-index.json", server.url()),
        );
        let entries = client.fetch_release_index().await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].support_phase, SupportPhase::Other);
        assert_eq!(entries[1].support_phase, SupportPhase::Lts);
        assert_eq!(entries[1].newest_version(), "8.0.15");
    }

    #[tokio::test]
    async fn active_and_maintenance_channels_select_no_latest() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/releases-index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "releases-index": [
                        { "channel-version": "9.0", "latest-release": "9.0.4", "latest-release-date": "2025-04-08", "support-phase": "active" },
                        { "channel-version": "6.0", "latest-release": "6.0.36", "latest-release-date": "2024-11-12", "support-phase": "maintenance" }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = ReleaseIndexClient::new(
            Client::new(),
            &format!("{}/releases-index.json", server.url()),
        );
        let entries = client.fetch_release_index().await.unwrap();

        mock.assert_async().await;
        assert!(
            entries
                .iter()
                .all(|entry| entry.support_phase == SupportPhase::Other)
        );
        assert!(select_latest(&entries).is_none());
    }

    #[tokio::test]
    async fn fetch_release_index_returns_invalid_response_for_bad_date() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/releases-index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "releases-index": [{ "channel-version": "8.0", "latest-release-date": "soon", "support-phase": "lts" }] }"#,
            )
            .create_async()
            .await;

        let client = ReleaseIndexClient::new(
            Client::new(),
            &format!("{}/releases-index.json", server.url()),
        );
        let result = client.fetch_release_index().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_release_index_returns_unavailable_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/releases-index.json")
            .with_status(500)
            .create_async()
            .await;

        let client = ReleaseIndexClient::new(
            Client::new(),
            &format!("{}/releases-index.json", server.url()),
        );
        let result = client.fetch_release_index().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::Unavailable { status: 500 })
        ));
    }
}
