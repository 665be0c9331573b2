//! Liveness of the host's dependent services

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

/// State of one custom service, reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceState {
    pub service_name: String,
    pub is_running: bool,
}

impl ServiceState {
    pub fn new(service_name: impl Into<String>, is_running: bool) -> Self {
        Self {
            service_name: service_name.into(),
            is_running,
        }
    }
}

/// Host-supplied check whether the database is reachable
pub type DatabaseCheck = Arc<dyn Fn() -> bool + Send + Sync>;

/// Host-supplied check returning the state of each custom service
pub type CustomServicesCheck = Arc<dyn Fn() -> Vec<ServiceState> + Send + Sync>;

/// Aggregated liveness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Ok,
    Nok,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Ok => "OK",
            ServiceStatus::Nok => "NOK",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate the host's checks. An absent check counts as passing.
pub fn get_service_states(
    db_check: Option<&(dyn Fn() -> bool + Send + Sync)>,
    custom_checks: Option<&(dyn Fn() -> Vec<ServiceState> + Send + Sync)>,
) -> ServiceStatus {
    if let Some(check) = db_check
        && !check()
    {
        warn!("Database check failed");
        return ServiceStatus::Nok;
    }

    if let Some(check) = custom_checks {
        let states = check();
        debug!("Custom services reported {} states", states.len());
        if let Some(down) = states.iter().find(|state| !state.is_running) {
            warn!("Service {} is not running", down.service_name);
            return ServiceStatus::Nok;
        }
    }

    ServiceStatus::Ok
}
