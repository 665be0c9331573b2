//! Records decoded from registry and release index responses

use chrono::NaiveDate;
use serde::Deserialize;

/// A package as published in a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryPackage {
    /// Package id as reported by the registry
    pub id: String,
    /// Version the registry advertises as current
    pub current_version: String,
    /// License reference, if the registry has one
    pub license_url: Option<String>,
    /// Every published version string
    pub versions: Vec<String>,
}

impl RegistryPackage {
    pub fn new(id: impl Into<String>, versions: Vec<String>) -> Self {
        Self {
            id: id.into(),
            versions,
            ..Default::default()
        }
    }

    pub fn with_license(mut self, license_url: impl Into<String>) -> Self {
        self.license_url = Some(license_url.into());
        self
    }

    /// License references as an ordered list (empty when unknown)
    pub fn licenses(&self) -> Vec<String> {
        self.license_url
            .iter()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Lifecycle stage of a runtime release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportPhase {
    Current,
    Lts,
    Eol,
    #[serde(other)]
    Other,
}

/// One channel from the runtime release index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseEntry {
    #[serde(rename = "channel-version")]
    pub channel_version: String,
    #[serde(default)]
    pub product: String,
    #[serde(rename = "latest-release", default)]
    pub latest_release: Option<String>,
    #[serde(rename = "latest-release-date")]
    pub latest_release_date: NaiveDate,
    #[serde(rename = "support-phase")]
    pub support_phase: SupportPhase,
}

impl ReleaseEntry {
    /// Newest release within the channel, falling back to the channel version
    pub fn newest_version(&self) -> &str {
        self.latest_release
            .as_deref()
            .unwrap_or(&self.channel_version)
    }
}
