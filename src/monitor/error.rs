use thiserror::Error;

use crate::config::ConfigError;
use crate::inventory::InventoryError;
use crate::version::error::RegistryError;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to set up registry client: {0}")]
    Registry(#[from] RegistryError),
}
