use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fulfilnet_core::{BusinessUnitCode, DomainError, DomainResult, Entity, WarehouseId};

/// One stored version of a warehouse.
///
/// A business unit code may own many versions over time, at most one of them
/// active (`archived_at == None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub business_unit_code: BusinessUnitCode,
    pub location: String,
    pub capacity: u32,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    /// Build a fresh active version from validated input.
    pub fn activate(valid: ValidatedWarehouse, created_at: DateTime<Utc>) -> Self {
        Self {
            id: WarehouseId::new(),
            business_unit_code: valid.business_unit_code,
            location: valid.location,
            capacity: valid.capacity,
            stock: valid.stock,
            created_at,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    /// Copy of this version marked archived at `at`.
    pub fn archived(&self, at: DateTime<Utc>) -> Self {
        Self {
            archived_at: Some(at),
            ..self.clone()
        }
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unvalidated create/replace request.
///
/// Every field is optional so that "not sent" and "sent as zero" stay
/// distinguishable until [`WarehouseCandidate::validate`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseCandidate {
    pub business_unit_code: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub stock: Option<i64>,
}

impl WarehouseCandidate {
    pub fn new(
        business_unit_code: impl Into<String>,
        location: impl Into<String>,
        capacity: i64,
        stock: i64,
    ) -> Self {
        Self {
            business_unit_code: Some(business_unit_code.into()),
            location: Some(location.into()),
            capacity: Some(capacity),
            stock: Some(stock),
        }
    }

    /// Required-field and range checks, then trimming.
    ///
    /// Order: missing/blank fields, `capacity > 0`, `stock >= 0`.
    pub fn validate(self) -> DomainResult<ValidatedWarehouse> {
        let code = self
            .business_unit_code
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                DomainError::invalid_input("warehouse businessUnitCode was not set on request")
            })?;
        let location = self
            .location
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| DomainError::invalid_input("warehouse location was not set on request"))?;
        let capacity = self
            .capacity
            .ok_or_else(|| DomainError::invalid_input("warehouse capacity was not set on request"))?;
        let stock = self
            .stock
            .ok_or_else(|| DomainError::invalid_input("warehouse stock was not set on request"))?;

        if capacity <= 0 {
            return Err(DomainError::invalid_input("warehouse capacity must be > 0"));
        }
        if stock < 0 {
            return Err(DomainError::invalid_input("warehouse stock must be >= 0"));
        }

        let capacity = u32::try_from(capacity)
            .map_err(|_| DomainError::invalid_input("warehouse capacity is out of range"))?;
        let stock = u32::try_from(stock)
            .map_err(|_| DomainError::invalid_input("warehouse stock is out of range"))?;

        Ok(ValidatedWarehouse {
            business_unit_code: BusinessUnitCode::parse(&code)?,
            location: location.trim().to_string(),
            capacity,
            stock,
        })
    }
}

/// Candidate that passed field validation: trimmed, non-optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWarehouse {
    pub business_unit_code: BusinessUnitCode,
    pub location: String,
    pub capacity: u32,
    pub stock: u32,
}

/// Active warehouse count and summed capacity at one location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationOccupancy {
    pub warehouses: u64,
    pub capacity: u64,
}

impl LocationOccupancy {
    /// Tally the active versions in `warehouses` that sit at `location`.
    pub fn at<'a>(warehouses: impl IntoIterator<Item = &'a Warehouse>, location: &str) -> Self {
        warehouses
            .into_iter()
            .filter(|w| w.is_active() && w.location == location)
            .fold(Self::default(), |acc, w| Self {
                warehouses: acc.warehouses + 1,
                capacity: acc.capacity + u64::from(w.capacity),
            })
    }
}
