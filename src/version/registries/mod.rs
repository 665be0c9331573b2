//! Registry implementations for fetching package metadata

pub mod crates_io;
pub mod release_index;
pub mod search;

pub use crates_io::CratesIoRegistry;
pub use release_index::ReleaseIndexClient;
pub use search::SearchQueryRegistry;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use crate::version::error::RegistryError;

/// Build the HTTP client shared by every registry of one engine
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, RegistryError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// Build a request URL under `base_url`.
///
/// Each path segment and query value is percent-encoded, so package names
/// containing `/`, `#`, `&` or `%` address exactly that package.
pub(crate) fn registry_url(
    base_url: &str,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, RegistryError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| RegistryError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Map non-2xx statuses to the matching [`RegistryError`]
pub(crate) fn ensure_success(response: &Response, subject: &str) -> Result<(), RegistryError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(RegistryError::NotFound(subject.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(RegistryError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        debug!("Registry returned status {} for {}", status, subject);
        return Err(RegistryError::Unavailable {
            status: status.as_u16(),
        });
    }

    Ok(())
}
