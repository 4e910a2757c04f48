//! Row-at-a-time store that re-reads the input for every lookup
use super::{DistanceStore, RowDistances};
use crate::core::mode::StoreStrategy;
use crate::core::record;
use crate::core::source::InputSource;
use crate::Result;
use std::borrow::Cow;

/// Keeps nothing but the input location. Each `row` call opens the input,
/// filters the lines touching the requested label and drops the handle.
///
/// Malformed lines are skipped rather than reported.
#[derive(Debug, Clone)]
pub struct DiskStore {
    source: InputSource,
}

impl DiskStore {
    pub fn new(source: InputSource) -> Self {
        Self { source }
    }
}

impl DistanceStore for DiskStore {
    fn row(&self, label: &str) -> Result<Cow<'_, RowDistances>> {
        let mut distances = RowDistances::new();
        let mut skipped = 0usize;

        self.source.for_each_line(|_, line| {
            // Cheap reject before tokenizing the distance
            match record::label_pair(line) {
                Some((a, b)) if a == label || b == label => {}
                _ => return Ok(()),
            }

            match record::parse_edge(line) {
                Ok(Some(edge)) => {
                    if let Some(other) = edge.opposite(label) {
                        distances.insert(other.to_string(), edge.distance);
                    }
                }
                Ok(None) => {}
                Err(_) => skipped += 1,
            }
            Ok(())
        })?;

        if skipped > 0 {
            tracing::trace!("Row {}: skipped {} malformed lines", label, skipped);
        }

        Ok(Cow::Owned(distances))
    }

    fn strategy(&self) -> StoreStrategy {
        StoreStrategy::DiskScan
    }
}
