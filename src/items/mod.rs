//! Item system: types, loot tables, generation, pricing and inventories.

pub mod generation;
pub mod inventory;
pub mod pricing;
pub mod tables;
pub mod types;

pub use generation::*;
pub use inventory::*;
pub use pricing::*;
pub use types::*;
