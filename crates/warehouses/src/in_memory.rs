use std::collections::HashSet;
use std::sync::RwLock;

use fulfilnet_core::{BusinessUnitCode, DomainError, DomainResult, Entity, WarehouseId};

use crate::store::{UnitOfWork, WarehouseStore, WarehouseWrite};
use crate::warehouse::Warehouse;

/// In-memory warehouse store.
///
/// Intended for tests/dev. Versions are kept in insertion order; a commit
/// stages its writes on a copy and swaps it in under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    versions: RwLock<Vec<Warehouse>>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored version, oldest first.
    pub fn snapshot(&self) -> DomainResult<Vec<Warehouse>> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, Vec<Warehouse>>> {
        self.versions
            .read()
            .map_err(|_| DomainError::storage("warehouse store lock poisoned"))
    }

    fn apply(staged: &mut Vec<Warehouse>, write: WarehouseWrite) -> DomainResult<()> {
        match write {
            WarehouseWrite::Create(warehouse) => {
                if locate(staged.as_slice(), warehouse.id()).is_some() {
                    return Err(DomainError::conflict(format!(
                        "warehouse version {} already stored",
                        warehouse.id
                    )));
                }
                staged.push(warehouse);
            }
            WarehouseWrite::Update(warehouse) => {
                let index = locate(staged.as_slice(), warehouse.id()).ok_or_else(|| {
                    DomainError::not_found(format!("warehouse version {}", warehouse.id))
                })?;
                staged[index] = warehouse;
            }
        }
        Ok(())
    }

    fn ensure_single_active(staged: &[Warehouse]) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for w in staged.iter().filter(|w| w.is_active()) {
            if !seen.insert(&w.business_unit_code) {
                return Err(DomainError::conflict(format!(
                    "more than one active warehouse for businessUnitCode {}",
                    w.business_unit_code
                )));
            }
        }
        Ok(())
    }
}

fn locate<E: Entity>(records: &[E], id: &E::Id) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

impl WarehouseStore for InMemoryWarehouseStore {
    fn list_active(&self) -> DomainResult<Vec<Warehouse>> {
        Ok(self.read()?.iter().filter(|w| w.is_active()).cloned().collect())
    }

    fn find_active_by_business_unit_code(
        &self,
        code: &BusinessUnitCode,
    ) -> DomainResult<Option<Warehouse>> {
        Ok(self
            .read()?
            .iter()
            .find(|w| w.is_active() && &w.business_unit_code == code)
            .cloned())
    }

    fn find_history(&self, code: &BusinessUnitCode) -> DomainResult<Vec<Warehouse>> {
        Ok(self
            .read()?
            .iter()
            .filter(|w| &w.business_unit_code == code)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &WarehouseId) -> DomainResult<Option<Warehouse>> {
        let versions = self.read()?;
        Ok(locate(versions.as_slice(), id).map(|index| versions[index].clone()))
    }

    fn commit(&self, unit: UnitOfWork) -> DomainResult<()> {
        if unit.is_empty() {
            return Ok(());
        }

        let mut versions = self
            .versions
            .write()
            .map_err(|_| DomainError::storage("warehouse store lock poisoned"))?;

        let mut staged = versions.clone();
        for write in unit.into_writes() {
            Self::apply(&mut staged, write)?;
        }
        Self::ensure_single_active(&staged)?;

        *versions = staged;
        Ok(())
    }
}
