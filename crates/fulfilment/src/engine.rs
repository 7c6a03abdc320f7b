//! Fulfilment assignment engine.

use tracing::{debug, info, instrument};

use fulfilnet_core::{Clock, DomainError, DomainResult, SystemClock};
use fulfilnet_warehouses::WarehouseStore;

use crate::assignment::{AssignmentRequest, FulfilmentAssignment, FulfilmentAssignmentView};
use crate::limits::AssignmentLimits;
use crate::ports::{AssignmentRepository, Catalog};

/// Validates and records store/product/warehouse assignments.
///
/// Reads current counts through the repository, checks them against
/// [`AssignmentLimits`], then writes. It never mutates warehouses or
/// locations.
#[derive(Debug)]
pub struct AssignmentEngine<R, W, K, C = SystemClock> {
    assignments: R,
    warehouses: W,
    catalog: K,
    limits: AssignmentLimits,
    clock: C,
}

impl<R, W, K> AssignmentEngine<R, W, K, SystemClock> {
    pub fn new(assignments: R, warehouses: W, catalog: K, limits: AssignmentLimits) -> Self {
        Self::with_clock(assignments, warehouses, catalog, limits, SystemClock)
    }
}

impl<R, W, K, C> AssignmentEngine<R, W, K, C> {
    pub fn with_clock(
        assignments: R,
        warehouses: W,
        catalog: K,
        limits: AssignmentLimits,
        clock: C,
    ) -> Self {
        Self {
            assignments,
            warehouses,
            catalog,
            limits,
            clock,
        }
    }

    pub fn limits(&self) -> AssignmentLimits {
        self.limits
    }

    pub fn assignments(&self) -> &R {
        &self.assignments
    }
}

impl<R, W, K, C> AssignmentEngine<R, W, K, C>
where
    R: AssignmentRepository,
    W: WarehouseStore,
    K: Catalog,
    C: Clock,
{
    /// Assign a warehouse to fulfil `product_id` for `store_id`.
    #[instrument(
        skip_all,
        name = "fulfilment.assign",
        fields(
            store_id = ?request.store_id,
            product_id = ?request.product_id,
            business_unit_code = ?request.warehouse_business_unit_code
        )
    )]
    pub fn assign(&self, request: AssignmentRequest) -> DomainResult<FulfilmentAssignmentView> {
        self.try_assign(request)
            .inspect_err(|e| debug!(kind = ?e.kind(), reason = %e, "assignment rejected"))
    }

    fn try_assign(&self, request: AssignmentRequest) -> DomainResult<FulfilmentAssignmentView> {
        let (store_id, product_id, code) = request.validate()?;

        if !self.catalog.store_exists(store_id)? {
            return Err(DomainError::not_found(format!("store {store_id} does not exist")));
        }
        if !self.catalog.product_exists(product_id)? {
            return Err(DomainError::not_found(format!("product {product_id} does not exist")));
        }
        let warehouse = self
            .warehouses
            .find_active_by_business_unit_code(&code)?
            .ok_or_else(|| DomainError::not_found(format!("active warehouse not found: {code}")))?;

        if self.assignments.exists(store_id, product_id, warehouse.id)? {
            return Err(DomainError::conflict(format!(
                "warehouse {code} is already assigned to store {store_id} for product {product_id}"
            )));
        }

        let per_store_product = self
            .assignments
            .count_distinct_warehouses_for_store_product(store_id, product_id)?;
        if per_store_product >= u64::from(self.limits.max_warehouses_per_store_product) {
            return Err(DomainError::conflict(format!(
                "store {store_id} already sources product {product_id} from {per_store_product} warehouses (max {})",
                self.limits.max_warehouses_per_store_product
            )));
        }

        // Only a warehouse the store does not use yet adds to its network.
        let products_here = self
            .assignments
            .count_distinct_products_for_store_warehouse(store_id, warehouse.id)?;
        if products_here == 0 {
            let per_store = self.assignments.count_distinct_warehouses_for_store(store_id)?;
            if per_store >= u64::from(self.limits.max_warehouses_per_store) {
                return Err(DomainError::conflict(format!(
                    "store {store_id} already draws from {per_store} warehouses (max {})",
                    self.limits.max_warehouses_per_store
                )));
            }
        }

        if products_here >= u64::from(self.limits.max_products_per_store_warehouse) {
            return Err(DomainError::conflict(format!(
                "warehouse {code} already fulfils {products_here} products for store {store_id} (max {})",
                self.limits.max_products_per_store_warehouse
            )));
        }

        let assignment =
            FulfilmentAssignment::new(store_id, product_id, warehouse.id, self.clock.now());
        self.assignments.create(&assignment)?;

        info!(
            store_id = %store_id,
            product_id = %product_id,
            warehouse = %code,
            warehouse_version = %warehouse.id,
            "fulfilment assignment created"
        );

        Ok(FulfilmentAssignmentView {
            store_id,
            product_id,
            warehouse_business_unit_code: warehouse.business_unit_code,
            created_at: assignment.created_at,
        })
    }
}
