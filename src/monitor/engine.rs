//! Reconciliation engine
//!
//! Ties the access gate, inventory, filter and registries together into the
//! two reports callers can ask for: service liveness and runtime/modules info.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{AccessToken, MonitorSettings, RegistryKind};
use crate::inventory::{InventoryError, ModuleInventory, ModuleRecord};
use crate::monitor::error::MonitorError;
use crate::monitor::gate::AccessGate;
use crate::monitor::lookup::{resolve_modules, resolve_runtime};
use crate::monitor::report::ModulesReport;
use crate::monitor::service::{
    CustomServicesCheck, DatabaseCheck, ServiceStatus, get_service_states,
};
use crate::version::registries::{
    CratesIoRegistry, ReleaseIndexClient, SearchQueryRegistry, build_client,
};
use crate::version::registry::{Registry, ReleaseIndex};

pub struct ReconciliationEngine {
    settings: Arc<MonitorSettings>,
    gate: AccessGate,
    inventory: Arc<dyn ModuleInventory>,
    registry: Arc<dyn Registry>,
    release_index: Arc<dyn ReleaseIndex>,
    db_check: Option<DatabaseCheck>,
    custom_checks: Option<CustomServicesCheck>,
}

impl ReconciliationEngine {
    /// Create an engine talking to the registries named in `settings`.
    ///
    /// One HTTP client is shared by the registry and the release index for
    /// the lifetime of the engine.
    pub fn new(
        settings: Arc<MonitorSettings>,
        inventory: Arc<dyn ModuleInventory>,
    ) -> Result<Self, MonitorError> {
        let registry_config = &settings.registry;
        let client = build_client(&registry_config.user_agent, registry_config.timeout())?;

        let registry: Arc<dyn Registry> = match registry_config.kind {
            RegistryKind::SearchQuery => Arc::new(SearchQueryRegistry::new(
                client.clone(),
                registry_config.base_url(),
            )),
            RegistryKind::CratesIo => Arc::new(CratesIoRegistry::new(
                client.clone(),
                registry_config.base_url(),
            )),
        };
        let release_index = Arc::new(ReleaseIndexClient::new(
            client,
            &registry_config.release_index_url,
        ));

        Ok(Self::build(settings, inventory, registry, release_index))
    }

    /// Build an engine with custom registries
    pub fn build(
        settings: Arc<MonitorSettings>,
        inventory: Arc<dyn ModuleInventory>,
        registry: Arc<dyn Registry>,
        release_index: Arc<dyn ReleaseIndex>,
    ) -> Self {
        let gate = AccessGate::new(settings.access_token.as_ref().map(AccessToken::expose));
        Self {
            settings,
            gate,
            inventory,
            registry,
            release_index,
            db_check: None,
            custom_checks: None,
        }
    }

    pub fn with_database_check(mut self, check: DatabaseCheck) -> Self {
        self.db_check = Some(check);
        self
    }

    pub fn with_custom_services_check(mut self, check: CustomServicesCheck) -> Self {
        self.custom_checks = Some(check);
        self
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Allow access only if a token is configured and `supplied` equals it
    pub fn check_access(&self, supplied: Option<&str>) -> bool {
        self.gate.check(supplied)
    }

    /// Liveness of the database and custom services
    pub fn get_service_states(&self) -> ServiceStatus {
        get_service_states(self.db_check.as_deref(), self.custom_checks.as_deref())
    }

    /// Runtime and modules info.
    ///
    /// Registry failures degrade single entries and never fail the call; only
    /// an unavailable inventory does.
    pub async fn get_modules_info(&self) -> Result<ModulesReport, MonitorError> {
        let records = self.list_inventory().await?;
        let total = records.len();

        let filter = &self.settings.filter;
        let records: Vec<_> = records
            .into_iter()
            .filter(|record| {
                let excluded = filter.is_excluded(&record.name);
                if excluded {
                    debug!("Excluding module {}", record.name);
                }
                !excluded
            })
            .collect();

        info!(
            "Resolving {} modules ({} excluded) against {}",
            records.len(),
            total - records.len(),
            self.registry.name()
        );

        let registry_config = &self.settings.registry;
        let timeout = registry_config.timeout();
        let (runtime, modules) = tokio::join!(
            resolve_runtime(self.release_index.as_ref(), &self.settings.runtime, timeout),
            resolve_modules(
                self.registry.as_ref(),
                &records,
                timeout,
                registry_config.max_concurrent_lookups,
            ),
        );

        Ok(ModulesReport { runtime, modules })
    }

    /// List the inventory on the blocking pool; inventories may touch the filesystem
    async fn list_inventory(&self) -> Result<Vec<ModuleRecord>, MonitorError> {
        let inventory = Arc::clone(&self.inventory);
        let entry_point = self.settings.entry_point.clone();

        let records = tokio::task::spawn_blocking(move || inventory.list_modules(&entry_point))
            .await
            .map_err(|e| InventoryError::Unavailable(format!("inventory task failed: {}", e)))??;

        Ok(records)
    }

    /// Liveness endpoint: `OK`/`NOK` for an authorized caller
    pub fn up(&self, token: Option<&str>) -> Result<ServiceStatus, MonitorError> {
        self.authorize(token)?;
        Ok(self.get_service_states())
    }

    /// Info endpoint: runtime and modules report for an authorized caller
    pub async fn modules(&self, token: Option<&str>) -> Result<ModulesReport, MonitorError> {
        self.authorize(token)?;
        self.get_modules_info().await
    }

    fn authorize(&self, token: Option<&str>) -> Result<(), MonitorError> {
        if self.check_access(token) {
            Ok(())
        } else {
            warn!("Rejected monitoring request with missing or invalid token");
            Err(MonitorError::Unauthorized)
        }
    }
}
