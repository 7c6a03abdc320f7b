//! Warehouse lifecycle engine.
//!
//! Validation is single-pass and synchronous: every request is checked against
//! the current store contents and the resolved location before any write is
//! issued. The first failing rule decides the error.
//!
//! ```text
//! Active(v1) --replace--> Archived(v1) + Active(v2) --archive--> Archived(v2)
//! ```

use tracing::{debug, info, instrument};

use fulfilnet_core::{BusinessUnitCode, Clock, DomainError, DomainResult, SystemClock};
use fulfilnet_locations::{Location, LocationDirectory};

use crate::store::{UnitOfWork, WarehouseStore};
use crate::warehouse::{LocationOccupancy, ValidatedWarehouse, Warehouse, WarehouseCandidate};

/// Create / replace / archive operations over a [`WarehouseStore`].
///
/// Stateless apart from its collaborators; holds no locks. Concurrent
/// requests on the same business unit code rely on the store's single-active
/// constraint as the backstop.
#[derive(Debug)]
pub struct WarehouseLifecycle<S, L, C = SystemClock> {
    store: S,
    locations: L,
    clock: C,
}

impl<S, L> WarehouseLifecycle<S, L, SystemClock> {
    pub fn new(store: S, locations: L) -> Self {
        Self::with_clock(store, locations, SystemClock)
    }
}

impl<S, L, C> WarehouseLifecycle<S, L, C> {
    pub fn with_clock(store: S, locations: L, clock: C) -> Self {
        Self {
            store,
            locations,
            clock,
        }
    }
}

impl<S, L, C> WarehouseLifecycle<S, L, C>
where
    S: WarehouseStore,
    L: LocationDirectory,
    C: Clock,
{
    /// Register a new warehouse under an unused business unit code.
    #[instrument(
        skip_all,
        name = "warehouse.create",
        fields(
            business_unit_code = ?candidate.business_unit_code,
            location = ?candidate.location
        )
    )]
    pub fn create(&self, candidate: WarehouseCandidate) -> DomainResult<Warehouse> {
        self.try_create(candidate)
            .inspect_err(|e| debug!(kind = ?e.kind(), reason = %e, "warehouse create rejected"))
    }

    /// Replace the active version of a business unit code with a new one,
    /// archiving the current version in the same unit of work.
    #[instrument(
        skip_all,
        name = "warehouse.replace",
        fields(
            business_unit_code = ?candidate.business_unit_code,
            location = ?candidate.location
        )
    )]
    pub fn replace(&self, candidate: WarehouseCandidate) -> DomainResult<Warehouse> {
        self.try_replace(candidate)
            .inspect_err(|e| debug!(kind = ?e.kind(), reason = %e, "warehouse replace rejected"))
    }

    /// Archive a specific version. Terminal: no new version is created.
    ///
    /// Only the id of `target` is trusted; the stored version is re-read and
    /// archived as stored.
    #[instrument(
        skip_all,
        name = "warehouse.archive",
        fields(version = ?target.as_ref().map(|w| *w.id.as_uuid()))
    )]
    pub fn archive(&self, target: Option<Warehouse>) -> DomainResult<Warehouse> {
        self.try_archive(target)
            .inspect_err(|e| debug!(kind = ?e.kind(), reason = %e, "warehouse archive rejected"))
    }

    /// Resolve the active version of `code` and archive it.
    pub fn archive_by_business_unit_code(&self, code: &str) -> DomainResult<Warehouse> {
        let code = BusinessUnitCode::parse(code)?;
        let current = self.store.find_active_by_business_unit_code(&code)?.ok_or_else(|| {
            DomainError::not_found(format!("active warehouse not found for businessUnitCode={code}"))
        })?;
        self.archive(Some(current))
    }

    pub fn active_warehouses(&self) -> DomainResult<Vec<Warehouse>> {
        self.store.list_active()
    }

    pub fn history(&self, code: &str) -> DomainResult<Vec<Warehouse>> {
        self.store.find_history(&BusinessUnitCode::parse(code)?)
    }

    fn try_create(&self, candidate: WarehouseCandidate) -> DomainResult<Warehouse> {
        let valid = candidate.validate()?;

        if self
            .store
            .find_active_by_business_unit_code(&valid.business_unit_code)?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "warehouse businessUnitCode already exists: {}",
                valid.business_unit_code
            )));
        }

        let location = self.resolve_location(&valid.location)?;

        if valid.capacity < valid.stock {
            return Err(DomainError::conflict("warehouse capacity must accommodate stock"));
        }
        ensure_within_location_ceiling(&valid, &location)?;

        let occupancy = LocationOccupancy::at(&self.store.list_active()?, &valid.location);
        if occupancy.warehouses >= u64::from(location.max_number_of_warehouses) {
            return Err(max_warehouses_reached(&location));
        }
        if occupancy.capacity + u64::from(valid.capacity) > u64::from(location.max_capacity) {
            return Err(location_capacity_exceeded(&location));
        }

        let warehouse = Warehouse::activate(valid, self.clock.now());
        self.store.create(&warehouse)?;

        info!(
            business_unit_code = %warehouse.business_unit_code,
            location = %warehouse.location,
            capacity = warehouse.capacity,
            stock = warehouse.stock,
            "warehouse created"
        );
        Ok(warehouse)
    }

    fn try_replace(&self, candidate: WarehouseCandidate) -> DomainResult<Warehouse> {
        let valid = candidate.validate()?;

        let current = self
            .store
            .find_active_by_business_unit_code(&valid.business_unit_code)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "active warehouse not found for businessUnitCode={}",
                    valid.business_unit_code
                ))
            })?;

        let target = self.resolve_location(&valid.location)?;

        if valid.capacity < current.stock {
            return Err(DomainError::conflict(
                "new capacity must accommodate existing stock",
            ));
        }
        if valid.stock != current.stock {
            return Err(DomainError::conflict(
                "new warehouse stock must match current warehouse stock",
            ));
        }

        let moving = valid.location != current.location;
        let occupancy = LocationOccupancy::at(&self.store.list_active()?, &valid.location);

        if moving && occupancy.warehouses >= u64::from(target.max_number_of_warehouses) {
            return Err(max_warehouses_reached(&target));
        }
        ensure_within_location_ceiling(&valid, &target)?;

        // Staying put: the current version's capacity is freed by the swap.
        let others = if moving {
            occupancy.capacity
        } else {
            occupancy.capacity.saturating_sub(u64::from(current.capacity))
        };
        if others + u64::from(valid.capacity) > u64::from(target.max_capacity) {
            return Err(location_capacity_exceeded(&target));
        }

        let now = self.clock.now();
        let replacement = Warehouse::activate(valid, now);

        let mut unit = UnitOfWork::new();
        unit.update(current.archived(now)).create(replacement.clone());
        self.store.commit(unit)?;

        info!(
            business_unit_code = %replacement.business_unit_code,
            archived_version = %current.id,
            from_location = %current.location,
            to_location = %replacement.location,
            capacity = replacement.capacity,
            "warehouse replaced"
        );
        Ok(replacement)
    }

    fn try_archive(&self, target: Option<Warehouse>) -> DomainResult<Warehouse> {
        let target =
            target.ok_or_else(|| DomainError::invalid_input("warehouse to archive was not set"))?;

        let stored = self.store.find_by_id(&target.id)?.ok_or_else(|| {
            DomainError::not_found(format!("warehouse version {} not found", target.id))
        })?;

        if !stored.is_active() {
            return Err(DomainError::conflict(format!(
                "warehouse {} is already archived",
                stored.business_unit_code
            )));
        }

        let archived = stored.archived(self.clock.now());
        self.store.update(&archived)?;

        info!(
            business_unit_code = %archived.business_unit_code,
            version = %archived.id,
            "warehouse archived"
        );
        Ok(archived)
    }

    fn resolve_location(&self, identifier: &str) -> DomainResult<Location> {
        self.locations.resolve(identifier).ok_or_else(|| {
            DomainError::invalid_reference(format!("invalid warehouse location: {identifier}"))
        })
    }
}

fn ensure_within_location_ceiling(
    valid: &ValidatedWarehouse,
    location: &Location,
) -> DomainResult<()> {
    if valid.capacity > location.max_capacity {
        return Err(DomainError::conflict(format!(
            "warehouse capacity {} exceeds max capacity {} of location {}",
            valid.capacity, location.max_capacity, location.identification
        )));
    }
    Ok(())
}

fn max_warehouses_reached(location: &Location) -> DomainError {
    DomainError::conflict(format!(
        "max number of warehouses reached for location: {}",
        location.identification
    ))
}

fn location_capacity_exceeded(location: &Location) -> DomainError {
    DomainError::conflict(format!(
        "location capacity exceeded for location: {}",
        location.identification
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use fulfilnet_core::{ErrorKind, FixedClock};
    use fulfilnet_locations::StaticLocationDirectory;

    use super::*;
    use crate::in_memory::InMemoryWarehouseStore;

    type Engine = WarehouseLifecycle<Arc<InMemoryWarehouseStore>, StaticLocationDirectory, FixedClock>;

    fn test_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    }

    fn engine_with(locations: impl IntoIterator<Item = Location>) -> (Engine, Arc<InMemoryWarehouseStore>) {
        let store = Arc::new(InMemoryWarehouseStore::new());
        let engine = WarehouseLifecycle::with_clock(
            store.clone(),
            StaticLocationDirectory::from_locations(locations),
            test_clock(),
        );
        (engine, store)
    }

    fn code(raw: &str) -> BusinessUnitCode {
        BusinessUnitCode::parse(raw).unwrap()
    }

    fn kind_of<T: core::fmt::Debug>(result: DomainResult<T>) -> ErrorKind {
        result.unwrap_err().kind()
    }

    // --- create ---

    #[test]
    fn create_persists_active_trimmed_warehouse() {
        let (engine, store) = engine_with([Location::new("AMSTERDAM-001", 5, 100)]);

        let created = engine
            .create(WarehouseCandidate::new(" MWH.NEW ", " AMSTERDAM-001 ", 60, 10))
            .unwrap();

        assert_eq!(created.business_unit_code.as_str(), "MWH.NEW");
        assert_eq!(created.location, "AMSTERDAM-001");
        assert_eq!(created.created_at, test_clock().0);
        assert!(created.archived_at.is_none());

        let stored = store.find_active_by_business_unit_code(&code("MWH.NEW")).unwrap();
        assert_eq!(stored, Some(created));
    }

    #[test]
    fn create_rejects_missing_fields_before_anything_else() {
        let (engine, _) = engine_with(Vec::<Location>::new());
        let err = engine.create(WarehouseCandidate::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.http_status(), 422);
    }

    #[test]
    fn create_with_existing_active_code_conflicts() {
        let (engine, _) = engine_with([Location::new("AMSTERDAM-001", 5, 100)]);
        engine
            .create(WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 10, 1))
            .unwrap();

        // Conflict is reported even though the location is unknown.
        let result = engine.create(WarehouseCandidate::new("MWH.001", "NOWHERE", 20, 2));
        assert_eq!(kind_of(result), ErrorKind::Conflict);
    }

    #[test]
    fn create_with_unknown_location_is_invalid_reference() {
        let (engine, _) = engine_with(Vec::<Location>::new());
        let result = engine.create(WarehouseCandidate::new("MWH.X", "UNKNOWN", 10, 1));
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert_eq!(err.http_status(), 422);
    }

    #[test]
    fn create_with_stock_above_capacity_conflicts() {
        let (engine, _) = engine_with([Location::new("ZWOLLE-001", 1, 40)]);
        let result = engine.create(WarehouseCandidate::new("MWH.BAD", "ZWOLLE-001", 10, 11));
        assert_eq!(kind_of(result), ErrorKind::Conflict);
    }

    #[test]
    fn create_with_capacity_above_location_ceiling_conflicts() {
        let (engine, store) = engine_with([Location::new("ZWOLLE-001", 3, 40)]);
        let result = engine.create(WarehouseCandidate::new("MWH.BIG", "ZWOLLE-001", 41, 0));
        assert_eq!(kind_of(result), ErrorKind::Conflict);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn create_respects_location_warehouse_count() {
        let (engine, _) = engine_with([Location::new("ZWOLLE-001", 1, 40)]);
        engine
            .create(WarehouseCandidate::new("MWH.A", "ZWOLLE-001", 10, 5))
            .unwrap();

        let err = engine
            .create(WarehouseCandidate::new("MWH.B", "ZWOLLE-001", 10, 5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.message().contains("max number of warehouses"));
    }

    #[test]
    fn create_respects_location_aggregate_capacity() {
        let (engine, _) = engine_with([Location::new("ZWOLLE-002", 2, 50)]);
        engine
            .create(WarehouseCandidate::new("MWH.A", "ZWOLLE-002", 30, 5))
            .unwrap();

        let err = engine
            .create(WarehouseCandidate::new("MWH.B", "ZWOLLE-002", 21, 5))
            .unwrap_err();
        assert!(err.message().contains("location capacity exceeded"));

        engine
            .create(WarehouseCandidate::new("MWH.B", "ZWOLLE-002", 20, 5))
            .unwrap();
    }

    #[test]
    fn archived_versions_do_not_count_against_location() {
        let (engine, _) = engine_with([Location::new("ZWOLLE-001", 1, 40)]);
        engine
            .create(WarehouseCandidate::new("MWH.A", "ZWOLLE-001", 40, 5))
            .unwrap();
        engine.archive_by_business_unit_code("MWH.A").unwrap();

        engine
            .create(WarehouseCandidate::new("MWH.B", "ZWOLLE-001", 40, 5))
            .unwrap();
    }

    #[test]
    fn code_can_be_reused_after_archive() {
        let (engine, _) = engine_with([Location::new("AMSTERDAM-001", 5, 100)]);
        engine
            .create(WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 10, 1))
            .unwrap();
        engine.archive_by_business_unit_code("MWH.001").unwrap();

        engine
            .create(WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 10, 1))
            .unwrap();
        assert_eq!(engine.history("MWH.001").unwrap().len(), 2);
    }

    // --- replace ---

    fn seeded(
        locations: impl IntoIterator<Item = Location>,
        existing: &[(&str, &str, i64, i64)],
    ) -> (Engine, Arc<InMemoryWarehouseStore>) {
        let (engine, store) = engine_with(locations);
        for (c, l, cap, stock) in existing {
            let valid = WarehouseCandidate::new(*c, *l, *cap, *stock).validate().unwrap();
            store.create(&Warehouse::activate(valid, Utc::now())).unwrap();
        }
        (engine, store)
    }

    #[test]
    fn replace_archives_current_and_creates_new_version() {
        let (engine, store) = seeded(
            [Location::new("AMSTERDAM-001", 5, 100)],
            &[("MWH.001", "AMSTERDAM-001", 50, 40)],
        );
        let before = store.find_active_by_business_unit_code(&code("MWH.001")).unwrap().unwrap();

        let replacement = engine
            .replace(WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 60, 40))
            .unwrap();

        assert_eq!(replacement.capacity, 60);
        assert_eq!(replacement.stock, 40);
        assert_ne!(replacement.id, before.id);

        let history = engine.history("MWH.001").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, before.id);
        assert_eq!(history[0].archived_at, Some(test_clock().0));
        assert!(history[1].is_active());

        let active = engine.active_warehouses().unwrap();
        assert_eq!(active, vec![replacement]);
    }

    #[test]
    fn replace_rejects_invalid_candidate_before_lookup() {
        let (engine, store) = seeded(
            [Location::new("AMSTERDAM-001", 5, 100)],
            &[("MWH.001", "AMSTERDAM-001", 50, 40)],
        );
        let before = store.snapshot().unwrap();

        let capacity_missing = WarehouseCandidate {
            capacity: None,
            ..WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 60, 40)
        };
        let location_missing = WarehouseCandidate {
            location: None,
            ..WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 60, 40)
        };
        let invalid = [
            WarehouseCandidate::new("  ", "AMSTERDAM-001", 60, 40),
            capacity_missing,
            location_missing,
            WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 0, 40),
            WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 60, -1),
        ];

        for candidate in invalid {
            let err = engine.replace(candidate.clone()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{candidate:?}");
            assert_eq!(err.http_status(), 422);
        }
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn replace_of_unknown_code_is_not_found() {
        let (engine, _) = engine_with([Location::new("AMSTERDAM-001", 5, 100)]);
        let result = engine.replace(WarehouseCandidate::new("MWH.404", "AMSTERDAM-001", 10, 0));
        assert_eq!(kind_of(result), ErrorKind::NotFound);
    }

    #[test]
    fn replace_with_stock_mismatch_conflicts_and_keeps_history() {
        let (engine, _) = seeded(
            [Location::new("AMSTERDAM-001", 5, 100)],
            &[("MWH.010", "AMSTERDAM-001", 50, 40)],
        );

        let result = engine.replace(WarehouseCandidate::new("MWH.010", "AMSTERDAM-001", 60, 41));
        assert_eq!(kind_of(result), ErrorKind::Conflict);
        assert_eq!(engine.history("MWH.010").unwrap().len(), 1);
    }

    #[test]
    fn replace_capacity_must_hold_existing_stock() {
        let (engine, store) = seeded(
            [Location::new("AMSTERDAM-001", 5, 100)],
            &[("MWH.001", "AMSTERDAM-001", 50, 40)],
        );
        let before = store.snapshot().unwrap();

        let err = engine
            .replace(WarehouseCandidate::new("MWH.001", "AMSTERDAM-001", 39, 40))
            .unwrap_err();
        assert!(err.message().contains("accommodate existing stock"));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn replace_into_unknown_location_is_invalid_reference() {
        let (engine, _) = seeded(Vec::<Location>::new(), &[("MWH.030", "AMSTERDAM-001", 50, 40)]);
        let result = engine.replace(WarehouseCandidate::new("MWH.030", "UNKNOWN", 60, 40));
        assert_eq!(kind_of(result), ErrorKind::InvalidReference);
    }

    #[test]
    fn replace_moving_into_full_location_conflicts() {
        let (engine, _) = seeded(
            [Location::new("ZWOLLE-002", 1, 50), Location::new("AMSTERDAM-001", 5, 100)],
            &[
                ("MWH.040", "AMSTERDAM-001", 20, 10),
                ("MWH.041", "ZWOLLE-002", 20, 10),
            ],
        );
        let err = engine
            .replace(WarehouseCandidate::new("MWH.040", "ZWOLLE-002", 20, 10))
            .unwrap_err();
        assert!(err.message().contains("max number of warehouses"));
    }

    #[test]
    fn replace_in_place_does_not_count_itself_twice() {
        // Location already at its warehouse limit; staying put is still allowed.
        let (engine, _) = seeded(
            [Location::new("ZWOLLE-001", 1, 40)],
            &[("MWH.001", "ZWOLLE-001", 30, 10)],
        );
        let replacement = engine
            .replace(WarehouseCandidate::new("MWH.001", "ZWOLLE-001", 40, 10))
            .unwrap();
        assert_eq!(replacement.capacity, 40);
    }

    #[test]
    fn replace_in_place_over_location_capacity_conflicts() {
        let (engine, _) = seeded(
            [Location::new("AMSTERDAM-002", 3, 75)],
            &[
                ("MWH.050", "AMSTERDAM-002", 50, 40),
                ("MWH.051", "AMSTERDAM-002", 20, 0),
            ],
        );
        let err = engine
            .replace(WarehouseCandidate::new("MWH.050", "AMSTERDAM-002", 56, 40))
            .unwrap_err();
        assert!(err.message().contains("location capacity exceeded"));

        engine
            .replace(WarehouseCandidate::new("MWH.050", "AMSTERDAM-002", 55, 40))
            .unwrap();
    }

    #[test]
    fn replace_above_location_ceiling_conflicts() {
        let (engine, _) = seeded(
            [Location::new("AMSTERDAM-002", 3, 75)],
            &[("MWH.050", "AMSTERDAM-002", 50, 40)],
        );
        let err = engine
            .replace(WarehouseCandidate::new("MWH.050", "AMSTERDAM-002", 80, 40))
            .unwrap_err();
        assert!(err.message().contains("exceeds max capacity"));
    }

    #[test]
    fn replace_moving_counts_full_target_capacity() {
        let (engine, store) = seeded(
            [Location::new("A", 5, 100), Location::new("B", 5, 50)],
            &[("MWH.1", "A", 30, 10), ("MWH.2", "B", 30, 10)],
        );
        let err = engine
            .replace(WarehouseCandidate::new("MWH.1", "B", 21, 10))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let moved = engine.replace(WarehouseCandidate::new("MWH.1", "B", 20, 10)).unwrap();
        assert_eq!(moved.location, "B");
        assert_eq!(LocationOccupancy::at(&store.list_active().unwrap(), "A").warehouses, 0);
    }

    // --- archive ---

    #[test]
    fn archive_sets_archived_at() {
        let (engine, store) = seeded(Vec::<Location>::new(), &[("MWH.001", "ZWOLLE-001", 40, 10)]);
        let current = store.find_active_by_business_unit_code(&code("MWH.001")).unwrap();

        let archived = engine.archive(current).unwrap();
        assert_eq!(archived.archived_at, Some(test_clock().0));
        assert!(store.list_active().unwrap().is_empty());
        assert_eq!(store.find_history(&code("MWH.001")).unwrap(), vec![archived]);
    }

    #[test]
    fn archive_without_target_is_invalid_input() {
        let (engine, _) = engine_with(Vec::<Location>::new());
        assert_eq!(kind_of(engine.archive(None)), ErrorKind::InvalidInput);
    }

    #[test]
    fn archive_twice_conflicts() {
        let (engine, store) = seeded(Vec::<Location>::new(), &[("MWH.002", "ZWOLLE-001", 40, 10)]);
        let current = store.find_active_by_business_unit_code(&code("MWH.002")).unwrap();
        let archived = engine.archive(current).unwrap();

        let err = engine.archive(Some(archived)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn archiving_a_stale_copy_twice_conflicts_and_keeps_first_timestamp() {
        let (engine, store) = seeded(Vec::<Location>::new(), &[("MWH.1", "ZWOLLE-001", 40, 10)]);
        let copy = store.find_active_by_business_unit_code(&code("MWH.1")).unwrap();

        let first = engine.archive(copy.clone()).unwrap();

        let later = WarehouseLifecycle::with_clock(
            store.clone(),
            StaticLocationDirectory::empty(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
        );
        let err = later.archive(copy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.find_history(&code("MWH.1")).unwrap(), vec![first]);
    }

    #[test]
    fn archive_ignores_edits_on_the_callers_copy() {
        let (engine, store) = seeded(Vec::<Location>::new(), &[("MWH.1", "ZWOLLE-001", 40, 10)]);
        let original = store
            .find_active_by_business_unit_code(&code("MWH.1"))
            .unwrap()
            .unwrap();

        let mut edited = original.clone();
        edited.capacity = 9999;
        edited.location = "ELSEWHERE".to_string();

        let archived = engine.archive(Some(edited)).unwrap();
        assert_eq!(archived.capacity, 40);
        assert_eq!(archived.location, "ZWOLLE-001");
        assert_eq!(archived, original.archived(test_clock().0));
        assert_eq!(store.find_history(&code("MWH.1")).unwrap(), vec![archived]);
    }

    #[test]
    fn archive_of_unstored_version_is_not_found() {
        let (engine, store) = engine_with(Vec::<Location>::new());
        let valid = WarehouseCandidate::new("MWH.9", "ZWOLLE-001", 10, 0).validate().unwrap();

        let result = engine.archive(Some(Warehouse::activate(valid, Utc::now())));
        assert_eq!(kind_of(result), ErrorKind::NotFound);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn archive_by_unknown_code_is_not_found() {
        let (engine, _) = engine_with(Vec::<Location>::new());
        assert_eq!(
            kind_of(engine.archive_by_business_unit_code("MWH.999")),
            ErrorKind::NotFound
        );
        assert_eq!(
            kind_of(engine.archive_by_business_unit_code("  ")),
            ErrorKind::InvalidInput
        );
    }

    // --- properties ---

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Create { code: u8, location: u8, capacity: i64 },
            Replace { code: u8, location: u8, capacity: i64 },
            Archive { code: u8 },
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..6, 0u8..3, 1i64..60)
                    .prop_map(|(code, location, capacity)| Op::Create { code, location, capacity }),
                (0u8..6, 0u8..3, 1i64..60)
                    .prop_map(|(code, location, capacity)| Op::Replace { code, location, capacity }),
                (0u8..6).prop_map(|code| Op::Archive { code }),
            ]
        }

        fn locations() -> Vec<Location> {
            vec![
                Location::new("L0", 1, 40),
                Location::new("L1", 2, 50),
                Location::new("L2", 3, 75),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: after any sequence of operations every location stays
            /// within its warehouse-count and aggregate-capacity limits, and no
            /// code has more than one active version.
            #[test]
            fn location_limits_hold_after_any_sequence(ops in prop::collection::vec(op(), 1..40)) {
                let (engine, store) = engine_with(locations());

                for op in ops {
                    let _ = match op {
                        Op::Create { code, location, capacity } => engine
                            .create(WarehouseCandidate::new(format!("MWH.{code}"), format!("L{location}"), capacity, 0))
                            .map(|_| ()),
                        Op::Replace { code, location, capacity } => engine
                            .replace(WarehouseCandidate::new(format!("MWH.{code}"), format!("L{location}"), capacity, 0))
                            .map(|_| ()),
                        Op::Archive { code } => engine
                            .archive_by_business_unit_code(&format!("MWH.{code}"))
                            .map(|_| ()),
                    };

                    let active = store.list_active().unwrap();
                    for location in locations() {
                        let occupancy = LocationOccupancy::at(&active, &location.identification);
                        prop_assert!(occupancy.warehouses <= u64::from(location.max_number_of_warehouses));
                        prop_assert!(occupancy.capacity <= u64::from(location.max_capacity));
                    }

                    let mut codes: Vec<_> = active.iter().map(|w| w.business_unit_code.clone()).collect();
                    let total = codes.len();
                    codes.sort();
                    codes.dedup();
                    prop_assert_eq!(codes.len(), total);
                }
            }

            /// Property: a successful replace swaps exactly one active version.
            #[test]
            fn replace_swaps_exactly_one_version(capacity in 10i64..=40) {
                let (engine, store) = seeded(locations(), &[("MWH.1", "L0", 10, 10), ("MWH.2", "L2", 10, 0)]);
                let before = store.list_active().unwrap();

                let replacement = engine
                    .replace(WarehouseCandidate::new("MWH.1", "L0", capacity, 10))
                    .unwrap();
                let after = store.list_active().unwrap();

                prop_assert_eq!(after.len(), before.len());
                let removed: Vec<_> = before.iter().filter(|w| !after.contains(w)).collect();
                let added: Vec<_> = after.iter().filter(|w| !before.contains(w)).collect();
                prop_assert_eq!(removed.len(), 1);
                prop_assert_eq!(added, vec![&replacement]);
                prop_assert_eq!(engine.history("MWH.1").unwrap().len(), 2);
            }
        }
    }
}
