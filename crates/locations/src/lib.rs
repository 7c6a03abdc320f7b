//! Location reference data.
//!
//! Locations are owned outside the fulfilment core; the engines only resolve
//! them by identifier to read their limits.

pub mod directory;
pub mod location;

pub use directory::{LocationDirectory, StaticLocationDirectory};
pub use location::Location;
