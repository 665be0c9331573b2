//! Cargo.lock inventory

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::inventory::traits::{InventoryError, ModuleInventory};
use crate::inventory::types::{ModuleRecord, into_inventory_order};

/// Where the lockfile content comes from
#[derive(Debug, Clone)]
enum LockfileSource {
    /// Content embedded into the host binary (e.g. via `include_str!`)
    Embedded(String),
    /// Lockfile read from disk on every pass
    File(PathBuf),
}

/// Inventory of the packages recorded in a `Cargo.lock`
#[derive(Debug, Clone)]
pub struct CargoLockInventory {
    source: LockfileSource,
}

impl CargoLockInventory {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            source: LockfileSource::Embedded(content.into()),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: LockfileSource::File(path.into()),
        }
    }

    /// Parse lockfile content into raw records, in file order
    pub fn parse(content: &str) -> Result<Vec<ModuleRecord>, InventoryError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_toml_ng::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set TOML language for tree-sitter: {}", e);
            InventoryError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse lockfile content");
            InventoryError::ParseFailed("Failed to parse TOML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(InventoryError::ParseFailed(
                "Lockfile contains invalid TOML".to_string(),
            ));
        }

        let mut results = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == "table_array_element" {
                Self::process_package(child, content, &mut results);
            }
        }

        Ok(results)
    }

    /// Extract name and version from a `[[package]]` element
    fn process_package(
        element: tree_sitter::Node,
        content: &str,
        results: &mut Vec<ModuleRecord>,
    ) {
        let mut cursor = element.walk();
        let mut is_package = false;
        let mut name: Option<String> = None;
        let mut version: Option<String> = None;

        for child in element.children(&mut cursor) {
            match child.kind() {
                "bare_key" => {
                    is_package = &content[child.byte_range()] == "package";
                }
                "pair" if is_package => {
                    let Some((key, value)) = Self::string_pair(child, content) else {
                        continue;
                    };
                    match key {
                        "name" => name = Some(value),
                        "version" => version = Some(value),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if let (Some(name), Some(version)) = (name, version) {
            results.push(ModuleRecord::new(name, version));
        }
    }

    /// Key and unquoted value of a `key = "value"` pair
    fn string_pair<'a>(pair: tree_sitter::Node, content: &'a str) -> Option<(&'a str, String)> {
        let mut cursor = pair.walk();
        let mut key: Option<&str> = None;

        for child in pair.children(&mut cursor) {
            match child.kind() {
                "bare_key" => key = Some(&content[child.byte_range()]),
                "string" => {
                    let value = content[child.byte_range()]
                        .trim()
                        .trim_start_matches('"')
                        .trim_end_matches('"')
                        .to_string();
                    return key.map(|k| (k, value));
                }
                _ => {}
            }
        }

        None
    }

    fn read_content(&self) -> Result<String, InventoryError> {
        match &self.source {
            LockfileSource::Embedded(content) => Ok(content.clone()),
            LockfileSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                warn!("Failed to read lockfile {:?}: {}", path, e);
                InventoryError::Unavailable(format!("{}: {}", path.display(), e))
            }),
        }
    }
}

impl ModuleInventory for CargoLockInventory {
    fn list_modules(&self, entry_point: &str) -> Result<Vec<ModuleRecord>, InventoryError> {
        let content = self.read_content()?;
        let records = Self::parse(&content)?;
        debug!("Lockfile lists {} packages", records.len());
        Ok(into_inventory_order(records, entry_point))
    }
}
