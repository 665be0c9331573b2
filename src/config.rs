use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::monitor::filter::ModuleFilter;
use crate::version::registries::crates_io;
use crate::version::registries::release_index::DEFAULT_RELEASE_INDEX_URL;
use crate::version::registries::search;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for a single registry request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Registry lookups in flight at once during one pass
pub const MAX_CONCURRENT_LOOKUPS: usize = 8;

/// User agent sent with every registry request
pub const DEFAULT_USER_AGENT: &str = concat!("version-monitor/", env!("CARGO_PKG_VERSION"));

/// Platform reported in the runtime section
pub const DEFAULT_PLATFORM: &str = "dotnetcore";

/// Exclusion patterns applied before any caller-supplied ones:
/// core runtime assemblies and generated code.
pub const BASELINE_EXCLUSIONS: [&str; 6] = [
    r"^System\.",
    r"^Microsoft\.(AspNetCore|NETCore|Win32|VisualBasic|CSharp)\.",
    r"^runtime\.",
    r"^NETStandard\.Library$",
    r"\.Views$",
    r"^Anonymously Hosted DynamicMethods Assembly$",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Access token secret; never printed by `Debug`
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Monitor configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Secret callers must present; unset or blank denies every request
    pub access_token: Option<AccessToken>,
    /// Name of the host's own module, left out of the inventory
    pub entry_point: String,
    pub exclusions: ExclusionConfig,
    pub registry: RegistryConfig,
    pub runtime: RuntimeConfig,
}

/// Module exclusion patterns (regular expression sources)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExclusionConfig {
    pub baseline: Vec<String>,
    pub additional: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            baseline: BASELINE_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            additional: Vec::new(),
        }
    }
}

/// Which registry API module lookups go to
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RegistryKind {
    /// `GET {baseUrl}/query?q=packageid:{name}`
    #[default]
    SearchQuery,
    /// `GET {baseUrl}/api/v1/crates/{name}`
    CratesIo,
}

/// Registry-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub kind: RegistryKind,
    /// Overrides the default base URL of `kind`
    pub base_url: Option<String>,
    pub release_index_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub max_concurrent_lookups: usize,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            kind: RegistryKind::default(),
            base_url: None,
            release_index_url: DEFAULT_RELEASE_INDEX_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            max_concurrent_lookups: MAX_CONCURRENT_LOOKUPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.kind) {
            (Some(url), _) => url,
            (None, RegistryKind::SearchQuery) => search::DEFAULT_BASE_URL,
            (None, RegistryKind::CratesIo) => crates_io::DEFAULT_BASE_URL,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Locally known runtime identity of the host
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub platform: String,
    pub platform_version: String,
    pub framework: String,
    pub framework_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            platform_version: String::new(),
            framework: String::new(),
            framework_version: String::new(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Validated configuration, built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub access_token: Option<AccessToken>,
    pub entry_point: String,
    pub filter: ModuleFilter,
    pub registry: RegistryConfig,
    pub runtime: RuntimeConfig,
}

impl MonitorSettings {
    /// Compile exclusion patterns; a malformed pattern fails here, never per module
    pub fn from_config(config: MonitorConfig) -> Result<Self, ConfigError> {
        let filter = ModuleFilter::new(&config.exclusions.baseline, &config.exclusions.additional)?;

        Ok(Self {
            access_token: config.access_token,
            entry_point: config.entry_point,
            filter,
            registry: config.registry,
            runtime: config.runtime,
        })
    }
}

/// Returns the path to the config directory for version-monitor.
/// Uses $XDG_CONFIG_HOME/version-monitor if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/version-monitor,
/// or ./version-monitor if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("version-monitor")
}
