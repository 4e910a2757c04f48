//! Distance lookups behind one interface, with an in-memory and a
//! disk-scanning implementation.

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::core::mode::StoreStrategy;
use crate::core::source::InputSource;
use crate::Result;
use std::borrow::Cow;
use std::collections::HashMap;

/// Distances recorded for one row label, keyed by the opposite label
pub type RowDistances = HashMap<String, f64>;

/// Source of pairwise distances for the matrix emitter.
///
/// Only pairs present in the input are returned; diagonal and default
/// values are the emitter's business.
pub trait DistanceStore {
    /// All recorded distances involving `label`
    fn row(&self, label: &str) -> Result<Cow<'_, RowDistances>>;

    /// Recorded distance between `a` and `b`, `None` when the pair is absent
    fn distance(&self, a: &str, b: &str) -> Result<Option<f64>> {
        Ok(self.row(a)?.get(b).copied())
    }

    fn strategy(&self) -> StoreStrategy;
}

/// Construct the store for `strategy`. The in-memory store is fully
/// loaded before this returns.
pub fn open_store(strategy: StoreStrategy, source: &InputSource) -> Result<Box<dyn DistanceStore>> {
    match strategy {
        StoreStrategy::InMemory => Ok(Box::new(MemoryStore::load(source)?)),
        StoreStrategy::DiskScan => Ok(Box::new(DiskStore::new(source.clone()))),
    }
}
