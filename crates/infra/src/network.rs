//! In-process wiring of both engines over shared in-memory adapters.

use std::sync::Arc;

use fulfilnet_core::{Clock, SystemClock};
use fulfilnet_fulfilment::{AssignmentEngine, InMemoryAssignmentRepository, InMemoryCatalog};
use fulfilnet_locations::StaticLocationDirectory;
use fulfilnet_warehouses::{InMemoryWarehouseStore, WarehouseLifecycle};

use crate::config::FulfilmentConfig;

pub type InMemoryLifecycle<C = SystemClock> =
    WarehouseLifecycle<Arc<InMemoryWarehouseStore>, Arc<StaticLocationDirectory>, Arc<C>>;

pub type InMemoryAssignments<C = SystemClock> = AssignmentEngine<
    Arc<InMemoryAssignmentRepository>,
    Arc<InMemoryWarehouseStore>,
    Arc<InMemoryCatalog>,
    Arc<C>,
>;

/// Both engines sharing one warehouse store, so an assignment always sees
/// the warehouse versions the lifecycle engine wrote.
pub struct FulfilmentNetwork<C = SystemClock> {
    lifecycle: InMemoryLifecycle<C>,
    assignments: InMemoryAssignments<C>,
    warehouses: Arc<InMemoryWarehouseStore>,
    repository: Arc<InMemoryAssignmentRepository>,
    catalog: Arc<InMemoryCatalog>,
}

impl FulfilmentNetwork<SystemClock> {
    /// Reference locations, empty stores, wall clock.
    pub fn in_memory(config: FulfilmentConfig) -> Self {
        Self::build(config, StaticLocationDirectory::default(), SystemClock)
    }
}

impl<C: Clock> FulfilmentNetwork<C> {
    pub fn build(config: FulfilmentConfig, locations: StaticLocationDirectory, clock: C) -> Self {
        let warehouses = Arc::new(InMemoryWarehouseStore::new());
        let repository = Arc::new(InMemoryAssignmentRepository::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let clock = Arc::new(clock);

        let lifecycle = WarehouseLifecycle::with_clock(
            warehouses.clone(),
            Arc::new(locations),
            clock.clone(),
        );
        let assignments = AssignmentEngine::with_clock(
            repository.clone(),
            warehouses.clone(),
            catalog.clone(),
            config.limits,
            clock,
        );

        tracing::debug!(limits = ?config.limits, "fulfilment network wired");

        Self {
            lifecycle,
            assignments,
            warehouses,
            repository,
            catalog,
        }
    }

    pub fn lifecycle(&self) -> &InMemoryLifecycle<C> {
        &self.lifecycle
    }

    pub fn assignments(&self) -> &InMemoryAssignments<C> {
        &self.assignments
    }

    pub fn warehouse_store(&self) -> &Arc<InMemoryWarehouseStore> {
        &self.warehouses
    }

    pub fn assignment_repository(&self) -> &Arc<InMemoryAssignmentRepository> {
        &self.repository
    }

    pub fn catalog(&self) -> &Arc<InMemoryCatalog> {
        &self.catalog
    }
}
