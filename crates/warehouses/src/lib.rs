//! Warehouse lifecycle domain module.
//!
//! Owns the warehouse record model, the [`WarehouseStore`] port and the
//! [`WarehouseLifecycle`] engine that enforces location capacity and count
//! limits across create / replace / archive, keeping every replaced version as
//! archived history.

pub mod in_memory;
pub mod lifecycle;
pub mod store;
pub mod warehouse;

pub use in_memory::InMemoryWarehouseStore;
pub use lifecycle::WarehouseLifecycle;
pub use store::{UnitOfWork, WarehouseStore, WarehouseWrite};
pub use warehouse::{LocationOccupancy, ValidatedWarehouse, Warehouse, WarehouseCandidate};
