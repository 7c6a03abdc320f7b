//! Configuration loading.
//!
//! Only the assignment limits are configurable today. Values come from the
//! process environment; a missing key keeps the default, a malformed one keeps
//! the default and logs a warning.

use thiserror::Error;
use tracing::warn;

use fulfilnet_fulfilment::AssignmentLimits;

pub const MAX_WAREHOUSES_PER_STORE_PRODUCT: &str = "FULFILMENT_MAX_WAREHOUSES_PER_STORE_PRODUCT";
pub const MAX_WAREHOUSES_PER_STORE: &str = "FULFILMENT_MAX_WAREHOUSES_PER_STORE";
pub const MAX_PRODUCTS_PER_STORE_WAREHOUSE: &str = "FULFILMENT_MAX_PRODUCTS_PER_STORE_WAREHOUSE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: '{value}' is not a non-negative integer")]
    NotANumber { key: String, value: String },

    #[error("{key}: limit must be at least 1")]
    Zero { key: String },
}

/// Runtime configuration of the fulfilment core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FulfilmentConfig {
    pub limits: AssignmentLimits,
}

impl FulfilmentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests, alternative sources).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AssignmentLimits::default();
        let read = |key: &str, default: u32| -> u32 {
            match lookup(key) {
                None => default,
                Some(raw) => parse_limit(key, &raw).unwrap_or_else(|err| {
                    warn!(error = %err, default, "ignoring invalid limit");
                    default
                }),
            }
        };

        let limits = AssignmentLimits {
            max_warehouses_per_store_product: read(
                MAX_WAREHOUSES_PER_STORE_PRODUCT,
                defaults.max_warehouses_per_store_product,
            ),
            max_warehouses_per_store: read(
                MAX_WAREHOUSES_PER_STORE,
                defaults.max_warehouses_per_store,
            ),
            max_products_per_store_warehouse: read(
                MAX_PRODUCTS_PER_STORE_WAREHOUSE,
                defaults.max_products_per_store_warehouse,
            ),
        };

        Self { limits }
    }
}

fn parse_limit(key: &str, raw: &str) -> Result<u32, ConfigError> {
    let value = raw.trim().parse::<u32>().map_err(|_| ConfigError::NotANumber {
        key: key.to_string(),
        value: raw.to_string(),
    })?;
    if value == 0 {
        return Err(ConfigError::Zero {
            key: key.to_string(),
        });
    }
    Ok(value)
}
