use std::sync::Arc;

use fulfilnet_core::{BusinessUnitCode, DomainResult, WarehouseId};

use crate::warehouse::Warehouse;

/// A single staged write against the warehouse store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseWrite {
    /// Insert a new version.
    Create(Warehouse),
    /// Overwrite the stored version with the same id.
    Update(Warehouse),
}

/// Writes that must land together or not at all.
///
/// Stage writes with [`UnitOfWork::create`] / [`UnitOfWork::update`] and hand
/// the unit to [`WarehouseStore::commit`]. Dropping an uncommitted unit
/// discards it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "a unit of work does nothing until it is committed"]
pub struct UnitOfWork {
    writes: Vec<WarehouseWrite>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, warehouse: Warehouse) -> &mut Self {
        self.writes.push(WarehouseWrite::Create(warehouse));
        self
    }

    pub fn update(&mut self, warehouse: Warehouse) -> &mut Self {
        self.writes.push(WarehouseWrite::Update(warehouse));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn into_writes(self) -> Vec<WarehouseWrite> {
        self.writes
    }
}

/// Durable collection of warehouse versions, active and archived.
///
/// Implementations must:
/// - keep at most one active version per business unit code (reject a write
///   that would break this with `Conflict`)
/// - apply a committed [`UnitOfWork`] atomically, so no reader observes a
///   partial unit
/// - never physically delete a version
pub trait WarehouseStore: Send + Sync {
    /// Every active version, across all codes and locations.
    fn list_active(&self) -> DomainResult<Vec<Warehouse>>;

    fn find_active_by_business_unit_code(
        &self,
        code: &BusinessUnitCode,
    ) -> DomainResult<Option<Warehouse>>;

    /// Every stored version for a code, oldest first.
    fn find_history(&self, code: &BusinessUnitCode) -> DomainResult<Vec<Warehouse>>;

    /// The stored version with this id, active or archived.
    fn find_by_id(&self, id: &WarehouseId) -> DomainResult<Option<Warehouse>>;

    /// Apply all staged writes atomically.
    fn commit(&self, unit: UnitOfWork) -> DomainResult<()>;

    fn create(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut unit = UnitOfWork::new();
        unit.create(warehouse.clone());
        self.commit(unit)
    }

    fn update(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut unit = UnitOfWork::new();
        unit.update(warehouse.clone());
        self.commit(unit)
    }
}

impl<S> WarehouseStore for Arc<S>
where
    S: WarehouseStore + ?Sized,
{
    fn list_active(&self) -> DomainResult<Vec<Warehouse>> {
        (**self).list_active()
    }

    fn find_active_by_business_unit_code(
        &self,
        code: &BusinessUnitCode,
    ) -> DomainResult<Option<Warehouse>> {
        (**self).find_active_by_business_unit_code(code)
    }

    fn find_history(&self, code: &BusinessUnitCode) -> DomainResult<Vec<Warehouse>> {
        (**self).find_history(code)
    }

    fn find_by_id(&self, id: &WarehouseId) -> DomainResult<Option<Warehouse>> {
        (**self).find_by_id(id)
    }

    fn commit(&self, unit: UnitOfWork) -> DomainResult<()> {
        (**self).commit(unit)
    }

    fn create(&self, warehouse: &Warehouse) -> DomainResult<()> {
        (**self).create(warehouse)
    }

    fn update(&self, warehouse: &Warehouse) -> DomainResult<()> {
        (**self).update(warehouse)
    }
}
