//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use version_monitor::config::{AccessToken, MonitorConfig, MonitorSettings};
use version_monitor::inventory::FixedInventory;
use version_monitor::monitor::ReconciliationEngine;
use version_monitor::version::error::RegistryError;
use version_monitor::version::registry::{Registry, ReleaseIndex};
use version_monitor::version::types::{RegistryPackage, ReleaseEntry};

/// Token configured on engines created by [`create_test_engine`]
pub const TEST_TOKEN: &str = "test-token";

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    packages: HashMap<String, RegistryPackage>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.packages.insert(
            package.to_string(),
            RegistryPackage::new(
                package,
                versions.into_iter().map(|v| v.to_string()).collect(),
            ),
        );
        self
    }

    pub fn with_license(mut self, package: &str, license_url: &str) -> Self {
        if let Some(entry) = self.packages.remove(package) {
            self.packages
                .insert(package.to_string(), entry.with_license(license_url));
        }
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_package(&self, package_name: &str) -> Result<RegistryPackage, RegistryError> {
        match self.packages.get(package_name) {
            Some(package) => Ok(package.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Mock release index returning a fixed result
pub struct MockReleaseIndex {
    entries: Option<Vec<ReleaseEntry>>,
}

impl MockReleaseIndex {
    pub fn with_entries(entries: Vec<ReleaseEntry>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn unavailable() -> Self {
        Self { entries: None }
    }
}

#[async_trait]
impl ReleaseIndex for MockReleaseIndex {
    async fn fetch_release_index(&self) -> Result<Vec<ReleaseEntry>, RegistryError> {
        self.entries
            .clone()
            .ok_or(RegistryError::Unavailable { status: 503 })
    }
}

/// Create settings with the test token and the given extra exclusions
pub fn create_test_settings(additional_exclusions: &[&str]) -> Arc<MonitorSettings> {
    let mut config = MonitorConfig {
        access_token: Some(AccessToken::new(TEST_TOKEN)),
        entry_point: "MyApp".to_string(),
        ..Default::default()
    };
    config.exclusions.additional = additional_exclusions.iter().map(|s| s.to_string()).collect();
    config.runtime.framework = ".NETCoreApp".to_string();
    config.runtime.framework_version = "8.0.4".to_string();
    config.runtime.platform_version = "8.0.4".to_string();

    Arc::new(MonitorSettings::from_config(config).unwrap())
}

/// Create an engine over a fixed inventory and mock registries
pub fn create_test_engine(
    inventory: FixedInventory,
    registry: MockRegistry,
    release_index: MockReleaseIndex,
) -> ReconciliationEngine {
    ReconciliationEngine::build(
        create_test_settings(&[]),
        Arc::new(inventory),
        Arc::new(registry),
        Arc::new(release_index),
    )
}
