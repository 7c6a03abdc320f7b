//! `fulfilnet-core`: shared building blocks for the fulfilment network.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, strongly-typed identifiers and the clock abstraction the
//! engines use to stamp records.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use id::{AssignmentId, BusinessUnitCode, ProductId, StoreId, WarehouseId};
