//! Module inventories
//!
//! An inventory enumerates the modules the host has loaded. The engine only
//! depends on the [`ModuleInventory`] capability; each host picks the
//! implementation that fits how it is built.
//!
//! - [`cargo_lock`]: packages recorded in a `Cargo.lock`
//! - [`fixed`]: a list handed over by the host

pub mod cargo_lock;
pub mod fixed;
pub mod traits;
pub mod types;

pub use cargo_lock::CargoLockInventory;
pub use fixed::FixedInventory;
pub use traits::{InventoryError, ModuleInventory};
pub use types::ModuleRecord;
