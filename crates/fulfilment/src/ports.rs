use std::sync::Arc;

use fulfilnet_core::{DomainResult, ProductId, StoreId, WarehouseId};

use crate::assignment::FulfilmentAssignment;

/// Existence checks against the store and product catalogues.
pub trait Catalog: Send + Sync {
    fn store_exists(&self, store_id: StoreId) -> DomainResult<bool>;
    fn product_exists(&self, product_id: ProductId) -> DomainResult<bool>;
}

/// Durable lookup and counting primitives over assignments.
///
/// Implementations must reject a second assignment for the same
/// (store, product, warehouse) triple with `Conflict`, so that races the
/// engine's pre-checks miss are still caught.
pub trait AssignmentRepository: Send + Sync {
    fn exists(
        &self,
        store_id: StoreId,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<bool>;

    fn count_distinct_warehouses_for_store_product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> DomainResult<u64>;

    fn count_distinct_warehouses_for_store(&self, store_id: StoreId) -> DomainResult<u64>;

    fn count_distinct_products_for_store_warehouse(
        &self,
        store_id: StoreId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<u64>;

    fn create(&self, assignment: &FulfilmentAssignment) -> DomainResult<()>;
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn store_exists(&self, store_id: StoreId) -> DomainResult<bool> {
        (**self).store_exists(store_id)
    }

    fn product_exists(&self, product_id: ProductId) -> DomainResult<bool> {
        (**self).product_exists(product_id)
    }
}

impl<R> AssignmentRepository for Arc<R>
where
    R: AssignmentRepository + ?Sized,
{
    fn exists(
        &self,
        store_id: StoreId,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<bool> {
        (**self).exists(store_id, product_id, warehouse_id)
    }

    fn count_distinct_warehouses_for_store_product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> DomainResult<u64> {
        (**self).count_distinct_warehouses_for_store_product(store_id, product_id)
    }

    fn count_distinct_warehouses_for_store(&self, store_id: StoreId) -> DomainResult<u64> {
        (**self).count_distinct_warehouses_for_store(store_id)
    }

    fn count_distinct_products_for_store_warehouse(
        &self,
        store_id: StoreId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<u64> {
        (**self).count_distinct_products_for_store_warehouse(store_id, warehouse_id)
    }

    fn create(&self, assignment: &FulfilmentAssignment) -> DomainResult<()> {
        (**self).create(assignment)
    }
}
