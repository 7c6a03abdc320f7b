use std::collections::HashMap;
use std::sync::Arc;

use crate::location::Location;

/// Read-only lookup of locations by identifier.
pub trait LocationDirectory: Send + Sync {
    /// Resolve a location; `None` when the identifier is unknown.
    fn resolve(&self, identifier: &str) -> Option<Location>;
}

impl<D> LocationDirectory for Arc<D>
where
    D: LocationDirectory + ?Sized,
{
    fn resolve(&self, identifier: &str) -> Option<Location> {
        (**self).resolve(identifier)
    }
}

/// Fixed in-process location table.
///
/// [`StaticLocationDirectory::default`] serves the reference network; tests
/// build their own table with [`StaticLocationDirectory::from_locations`].
#[derive(Debug, Clone)]
pub struct StaticLocationDirectory {
    locations: HashMap<String, Location>,
}

impl StaticLocationDirectory {
    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let locations = locations
            .into_iter()
            .map(|l| (l.identification.clone(), l))
            .collect();
        Self { locations }
    }

    pub fn empty() -> Self {
        Self {
            locations: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for StaticLocationDirectory {
    fn default() -> Self {
        Self::from_locations([
            Location::new("ZWOLLE-001", 1, 40),
            Location::new("ZWOLLE-002", 2, 50),
            Location::new("AMSTERDAM-001", 5, 100),
            Location::new("AMSTERDAM-002", 3, 75),
            Location::new("TILBURG-001", 1, 40),
            Location::new("HELMOND-001", 1, 45),
            Location::new("EINDHOVEN-001", 2, 70),
            Location::new("VETSBY-001", 1, 90),
        ])
    }
}

impl LocationDirectory for StaticLocationDirectory {
    fn resolve(&self, identifier: &str) -> Option<Location> {
        let key = identifier.trim();
        if key.is_empty() {
            return None;
        }
        let found = self.locations.get(key).cloned();
        if found.is_none() {
            tracing::debug!(location = key, "unknown location identifier");
        }
        found
    }
}
