//! Monitoring layer
//!
//! This module answers the two questions a monitoring caller can ask: are
//! the host's services up, and which runtime and module versions are
//! installed compared to the newest published ones.
//!
//! # Modules
//!
//! - [`engine`]: `ReconciliationEngine`, the orchestrator behind both reports
//! - [`filter`]: Regular-expression module exclusion
//! - [`gate`]: Shared-secret access check
//! - [`lookup`]: Per-module and runtime registry lookups with graceful degradation
//! - [`report`]: `ModulesReport`, `ModuleInfo` and `RuntimeInfo`
//! - [`service`]: Database and custom service liveness
//! - [`error`]: Errors surfaced to callers

pub mod engine;
pub mod error;
pub mod filter;
pub mod gate;
pub mod lookup;
pub mod report;
pub mod service;

pub use engine::ReconciliationEngine;
pub use error::MonitorError;
pub use report::{ModuleInfo, ModulesReport, RuntimeInfo};
pub use service::{ServiceState, ServiceStatus};
