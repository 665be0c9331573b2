//! Module inventory trait definition

use crate::inventory::types::ModuleRecord;

/// Capability to enumerate the modules loaded by the host
///
/// Listing runs on a blocking thread, so implementations may read files.
pub trait ModuleInventory: Send + Sync {
    /// List loaded modules in name-ascending order without duplicates,
    /// excluding the module named `entry_point`
    fn list_modules(&self, entry_point: &str) -> Result<Vec<ModuleRecord>, InventoryError>;
}

/// Error type for inventory operations
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The host environment could not be introspected
    #[error("Module inventory unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse the inventory source
    #[error("Failed to parse inventory: {0}")]
    ParseFailed(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}
