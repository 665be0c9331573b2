//! Inventory backed by a list supplied by the host

use crate::inventory::traits::{InventoryError, ModuleInventory};
use crate::inventory::types::{ModuleRecord, into_inventory_order};

/// Inventory over a fixed set of records
#[derive(Debug, Clone, Default)]
pub struct FixedInventory {
    records: Vec<ModuleRecord>,
}

impl FixedInventory {
    pub fn new(records: Vec<ModuleRecord>) -> Self {
        Self { records }
    }

    pub fn with_module(mut self, name: &str, installed_version: &str) -> Self {
        self.records
            .push(ModuleRecord::new(name, installed_version));
        self
    }
}

impl ModuleInventory for FixedInventory {
    fn list_modules(&self, entry_point: &str) -> Result<Vec<ModuleRecord>, InventoryError> {
        Ok(into_inventory_order(self.records.clone(), entry_point))
    }
}
