//! Entity trait: records that are tracked by identity rather than by value.

/// A persisted record with a stable internal identifier.
///
/// Warehouse versions and fulfilment assignments both carry one; ports use it
/// to address the exact record an update targets.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
