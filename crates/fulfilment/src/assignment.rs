use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fulfilnet_core::{
    AssignmentId, BusinessUnitCode, DomainError, DomainResult, Entity, ProductId, StoreId,
    WarehouseId,
};

/// Stored link between a store's demand for a product and the warehouse that
/// fulfils it. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentAssignment {
    pub id: AssignmentId,
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub created_at: DateTime<Utc>,
}

impl FulfilmentAssignment {
    pub fn new(
        store_id: StoreId,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            store_id,
            product_id,
            warehouse_id,
            created_at,
        }
    }

    /// The uniqueness key: (store, product, warehouse).
    pub fn triple(&self) -> (StoreId, ProductId, WarehouseId) {
        (self.store_id, self.product_id, self.warehouse_id)
    }
}

impl Entity for FulfilmentAssignment {
    type Id = AssignmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unvalidated assignment request as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub store_id: Option<i64>,
    pub product_id: Option<i64>,
    pub warehouse_business_unit_code: Option<String>,
}

impl AssignmentRequest {
    pub fn new(store_id: i64, product_id: i64, warehouse_business_unit_code: impl Into<String>) -> Self {
        Self {
            store_id: Some(store_id),
            product_id: Some(product_id),
            warehouse_business_unit_code: Some(warehouse_business_unit_code.into()),
        }
    }

    /// Check ids are present and positive, and the warehouse code non-blank
    /// (trimmed on the way out).
    pub fn validate(self) -> DomainResult<(StoreId, ProductId, BusinessUnitCode)> {
        let store_id = self
            .store_id
            .ok_or_else(|| DomainError::invalid_input("storeId was not set on request"))
            .and_then(StoreId::new)?;
        let product_id = self
            .product_id
            .ok_or_else(|| DomainError::invalid_input("productId was not set on request"))
            .and_then(ProductId::new)?;
        let code = BusinessUnitCode::parse(self.warehouse_business_unit_code.as_deref().unwrap_or(""))?;
        Ok((store_id, product_id, code))
    }
}

/// What callers get back after a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentAssignmentView {
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub warehouse_business_unit_code: BusinessUnitCode,
    pub created_at: DateTime<Utc>,
}
