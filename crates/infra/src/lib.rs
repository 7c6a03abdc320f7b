//! Infrastructure layer: configuration loading and in-process wiring of the
//! engines to their adapters.

pub mod config;
pub mod network;


pub use config::{ConfigError, FulfilmentConfig};
pub use network::{FulfilmentNetwork, InMemoryAssignments, InMemoryLifecycle};
