//! Registry traits for fetching package metadata and runtime releases

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::{RegistryPackage, ReleaseEntry};

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Short name used in logs (e.g., "search", "crates_io")
    fn name(&self) -> &'static str;

    /// Fetches a package's published versions and license reference
    ///
    /// # Arguments
    /// * `package_name` - The module name as reported by the inventory
    ///
    /// # Returns
    /// * `Ok(RegistryPackage)` - The package with every published version
    /// * `Err(RegistryError)` - If the request fails or the body cannot be decoded
    async fn fetch_package(&self, package_name: &str) -> Result<RegistryPackage, RegistryError>;

    /// License references for a package (empty when the registry has none)
    async fn fetch_license(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        Ok(self.fetch_package(package_name).await?.licenses())
    }
}

/// Trait for fetching the list of published runtime release channels
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseIndex: Send + Sync {
    async fn fetch_release_index(&self) -> Result<Vec<ReleaseEntry>, RegistryError>;
}
