use serde::{Deserialize, Serialize};

/// A physical site and the limits it places on the warehouses it hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub identification: String,
    /// Maximum number of active warehouses at this location.
    pub max_number_of_warehouses: u32,
    /// Maximum aggregate capacity of the active warehouses at this location.
    pub max_capacity: u32,
}

impl Location {
    pub fn new(
        identification: impl Into<String>,
        max_number_of_warehouses: u32,
        max_capacity: u32,
    ) -> Self {
        Self {
            identification: identification.into(),
            max_number_of_warehouses,
            max_capacity,
        }
    }
}
