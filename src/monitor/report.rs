//! Reports returned to callers

use serde::Serialize;

/// Version info for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub installed_version: String,
    pub newest_version: String,
    pub licenses: Vec<String>,
}

/// Version info for the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub platform: String,
    pub platform_version: String,
    pub framework: String,
    pub framework_installed_version: String,
    /// `None` when the release index could not be resolved
    pub framework_newest_version: Option<String>,
}

/// Runtime and modules info, as returned by the info endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulesReport {
    pub runtime: RuntimeInfo,
    pub modules: Vec<ModuleInfo>,
}
