//! Common types for module inventories

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::version::semver::SemanticVersion;

/// A module loaded by the host, as seen by an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Module name (unique within one inventory)
    pub name: String,
    /// Installed version string as reported by the host
    pub installed_version: String,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, installed_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed_version: installed_version.into(),
        }
    }
}

/// Bring raw records into inventory order.
///
/// Drops the entry point and empty names, collapses duplicate names to the
/// highest installed version and sorts by name ascending.
pub fn into_inventory_order(records: Vec<ModuleRecord>, entry_point: &str) -> Vec<ModuleRecord> {
    let mut by_name: BTreeMap<String, ModuleRecord> = BTreeMap::new();

    for record in records {
        if record.name.is_empty() || record.name == entry_point {
            continue;
        }

        match by_name.get(&record.name) {
            Some(existing)
                if SemanticVersion::parse(&record.installed_version)
                    .compare(&SemanticVersion::parse(&existing.installed_version))
                    != Ordering::Greater => {}
            _ => {
                by_name.insert(record.name.clone(), record);
            }
        }
    }

    by_name.into_values().collect()
}
