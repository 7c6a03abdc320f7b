use serde::{Deserialize, Serialize};

/// Cardinality limits enforced by the assignment engine.
///
/// Business policy, not structure: deployments override them through
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentLimits {
    /// Distinct warehouses that may serve one (store, product) pair.
    pub max_warehouses_per_store_product: u32,
    /// Distinct warehouses one store may draw from across all products.
    pub max_warehouses_per_store: u32,
    /// Distinct products one warehouse may fulfil for one store.
    pub max_products_per_store_warehouse: u32,
}

impl AssignmentLimits {
    pub const DEFAULT_MAX_WAREHOUSES_PER_STORE_PRODUCT: u32 = 2;
    pub const DEFAULT_MAX_WAREHOUSES_PER_STORE: u32 = 3;
    pub const DEFAULT_MAX_PRODUCTS_PER_STORE_WAREHOUSE: u32 = 5;

    pub fn with_max_warehouses_per_store_product(mut self, limit: u32) -> Self {
        self.max_warehouses_per_store_product = limit;
        self
    }

    pub fn with_max_warehouses_per_store(mut self, limit: u32) -> Self {
        self.max_warehouses_per_store = limit;
        self
    }

    pub fn with_max_products_per_store_warehouse(mut self, limit: u32) -> Self {
        self.max_products_per_store_warehouse = limit;
        self
    }
}

impl Default for AssignmentLimits {
    fn default() -> Self {
        Self {
            max_warehouses_per_store_product: Self::DEFAULT_MAX_WAREHOUSES_PER_STORE_PRODUCT,
            max_warehouses_per_store: Self::DEFAULT_MAX_WAREHOUSES_PER_STORE,
            max_products_per_store_warehouse: Self::DEFAULT_MAX_PRODUCTS_PER_STORE_WAREHOUSE,
        }
    }
}
