use std::collections::HashSet;
use std::sync::RwLock;

use fulfilnet_core::{DomainError, DomainResult, ProductId, StoreId, WarehouseId};

use crate::assignment::FulfilmentAssignment;
use crate::ports::{AssignmentRepository, Catalog};

fn poisoned() -> DomainError {
    DomainError::storage("assignment store lock poisoned")
}

/// In-memory assignment repository for tests/dev.
///
/// `create` enforces the (store, product, warehouse) uniqueness constraint
/// under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<Vec<FulfilmentAssignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> DomainResult<Vec<FulfilmentAssignment>> {
        Ok(self.assignments.read().map_err(|_| poisoned())?.clone())
    }

    pub fn count(&self) -> DomainResult<usize> {
        Ok(self.assignments.read().map_err(|_| poisoned())?.len())
    }

    fn count_distinct<K, F, M>(&self, scope: F, key: M) -> DomainResult<u64>
    where
        K: Eq + std::hash::Hash,
        F: Fn(&FulfilmentAssignment) -> bool,
        M: Fn(&FulfilmentAssignment) -> K,
    {
        let assignments = self.assignments.read().map_err(|_| poisoned())?;
        let distinct: HashSet<K> = assignments.iter().filter(|a| scope(*a)).map(key).collect();
        Ok(distinct.len() as u64)
    }
}

impl AssignmentRepository for InMemoryAssignmentRepository {
    fn exists(
        &self,
        store_id: StoreId,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<bool> {
        let assignments = self.assignments.read().map_err(|_| poisoned())?;
        Ok(assignments
            .iter()
            .any(|a| a.triple() == (store_id, product_id, warehouse_id)))
    }

    fn count_distinct_warehouses_for_store_product(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> DomainResult<u64> {
        self.count_distinct(
            |a| a.store_id == store_id && a.product_id == product_id,
            |a| a.warehouse_id,
        )
    }

    fn count_distinct_warehouses_for_store(&self, store_id: StoreId) -> DomainResult<u64> {
        self.count_distinct(|a| a.store_id == store_id, |a| a.warehouse_id)
    }

    fn count_distinct_products_for_store_warehouse(
        &self,
        store_id: StoreId,
        warehouse_id: WarehouseId,
    ) -> DomainResult<u64> {
        self.count_distinct(
            |a| a.store_id == store_id && a.warehouse_id == warehouse_id,
            |a| a.product_id,
        )
    }

    fn create(&self, assignment: &FulfilmentAssignment) -> DomainResult<()> {
        let mut assignments = self.assignments.write().map_err(|_| poisoned())?;
        if assignments.iter().any(|a| a.triple() == assignment.triple()) {
            return Err(DomainError::conflict(format!(
                "assignment already exists for store {} / product {} / warehouse {}",
                assignment.store_id, assignment.product_id, assignment.warehouse_id
            )));
        }
        assignments.push(assignment.clone());
        Ok(())
    }
}

/// In-memory store/product catalogue.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    stores: RwLock<HashSet<StoreId>>,
    products: RwLock<HashSet<ProductId>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(
        stores: impl IntoIterator<Item = StoreId>,
        products: impl IntoIterator<Item = ProductId>,
    ) -> Self {
        Self {
            stores: RwLock::new(stores.into_iter().collect()),
            products: RwLock::new(products.into_iter().collect()),
        }
    }

    pub fn add_store(&self, store_id: StoreId) -> DomainResult<()> {
        self.stores.write().map_err(|_| poisoned())?.insert(store_id);
        Ok(())
    }

    pub fn add_product(&self, product_id: ProductId) -> DomainResult<()> {
        self.products.write().map_err(|_| poisoned())?.insert(product_id);
        Ok(())
    }
}

impl Catalog for InMemoryCatalog {
    fn store_exists(&self, store_id: StoreId) -> DomainResult<bool> {
        Ok(self.stores.read().map_err(|_| poisoned())?.contains(&store_id))
    }

    fn product_exists(&self, product_id: ProductId) -> DomainResult<bool> {
        Ok(self.products.read().map_err(|_| poisoned())?.contains(&product_id))
    }
}
