//! Registry lookups for one reconciliation pass

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::config::RuntimeConfig;
use crate::inventory::ModuleRecord;
use crate::monitor::report::{ModuleInfo, RuntimeInfo};
use crate::version::channel::select_latest;
use crate::version::error::RegistryError;
use crate::version::registry::{Registry, ReleaseIndex};
use crate::version::semver::{find_newest, normalize_version};

/// Await a registry call, giving up after `timeout`
async fn with_timeout<T, F>(call: F, timeout: Duration) -> Result<T, RegistryError>
where
    F: Future<Output = Result<T, RegistryError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| RegistryError::Timeout(timeout.as_millis() as u64))?
}

/// Resolve newest version and licenses of a single module
///
/// Never fails: when the lookup fails or yields no comparable version the
/// installed version is reported as newest, with no licenses on failure.
pub async fn resolve_module(
    registry: &dyn Registry,
    record: &ModuleRecord,
    timeout: Duration,
) -> ModuleInfo {
    let installed_version = normalize_version(&record.installed_version);

    let (newest_version, licenses) =
        match with_timeout(registry.fetch_package(&record.name), timeout).await {
            Ok(package) => {
                let newest = find_newest(&package.versions)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| {
                        debug!(
                            "No comparable versions for {}/{}, keeping installed version",
                            registry.name(),
                            record.name
                        );
                        installed_version.clone()
                    });
                (newest, package.licenses())
            }
            Err(e) => {
                if e.is_unavailable() {
                    warn!(
                        "Registry unavailable for {}/{}: {}",
                        registry.name(),
                        record.name,
                        e
                    );
                } else {
                    warn!(
                        "Invalid registry response for {}/{}: {}",
                        registry.name(),
                        record.name,
                        e
                    );
                }
                (installed_version.clone(), Vec::new())
            }
        };

    ModuleInfo {
        name: record.name.clone(),
        installed_version,
        newest_version,
        licenses,
    }
}

/// Resolve every module, keeping inventory order.
///
/// At most `max_concurrent` lookups are in flight; a failing or slow lookup
/// only degrades its own module.
pub async fn resolve_modules(
    registry: &dyn Registry,
    records: &[ModuleRecord],
    timeout: Duration,
    max_concurrent: usize,
) -> Vec<ModuleInfo> {
    stream::iter(records)
        .map(|record| resolve_module(registry, record, timeout))
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

/// Resolve installed and newest runtime versions
///
/// A failing release index leaves `framework_newest_version` unset.
pub async fn resolve_runtime(
    release_index: &dyn ReleaseIndex,
    runtime: &RuntimeConfig,
    timeout: Duration,
) -> RuntimeInfo {
    let framework_newest_version =
        match with_timeout(release_index.fetch_release_index(), timeout).await {
            Ok(entries) => {
                let selected = select_latest(&entries);
                if selected.is_none() {
                    debug!(
                        "No current or lts channel among {} release entries",
                        entries.len()
                    );
                }
                selected.map(|entry| normalize_version(entry.newest_version()))
            }
            Err(e) => {
                warn!("Failed to resolve runtime release index: {}", e);
                None
            }
        };

    RuntimeInfo {
        platform: runtime.platform.clone(),
        platform_version: normalize_version(&runtime.platform_version),
        framework: runtime.framework.clone(),
        framework_installed_version: normalize_version(&runtime.framework_version),
        framework_newest_version,
    }
}
