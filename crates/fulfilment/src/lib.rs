//! Fulfilment assignment domain module.
//!
//! An assignment commits a warehouse to fulfil one product's demand for one
//! store. The [`AssignmentEngine`] enforces triple uniqueness and the three
//! cardinality limits in [`AssignmentLimits`].

pub mod assignment;
pub mod engine;
pub mod in_memory;
pub mod limits;
pub mod ports;

pub use assignment::{AssignmentRequest, FulfilmentAssignment, FulfilmentAssignmentView};
pub use engine::AssignmentEngine;
pub use in_memory::{InMemoryAssignmentRepository, InMemoryCatalog};
pub use limits::AssignmentLimits;
pub use ports::{AssignmentRepository, Catalog};
