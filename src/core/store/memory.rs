//! Fully materialized symmetric distance store
use super::{DistanceStore, RowDistances};
use crate::core::mode::StoreStrategy;
use crate::core::record;
use crate::core::source::InputSource;
use crate::Result;
use std::borrow::Cow;
use std::collections::HashMap;

/// Nested per-label tables holding every input edge in both directions.
///
/// A pair seen more than once keeps the value from the later line.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: HashMap<String, RowDistances>,
    edges: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly ingest the whole input.
    ///
    /// Any non-blank line that is not exactly `label label distance` with a
    /// finite distance aborts the load with a format error.
    pub fn load(source: &InputSource) -> Result<Self> {
        let mut store = Self::new();

        source.for_each_line(|line_number, line| {
            match record::parse_edge(line) {
                Ok(Some(edge)) => store.insert(edge.source, edge.target, edge.distance),
                Ok(None) => {}
                Err(reason) => return Err(source.format_error(line_number, line, reason)),
            }
            Ok(())
        })?;

        tracing::debug!(
            "Loaded {} edges over {} labels into memory",
            store.edges,
            store.rows.len()
        );
        Ok(store)
    }

    /// Record `distance` for both `(a, b)` and `(b, a)`
    pub fn insert(&mut self, a: &str, b: &str, distance: f64) {
        self.edges += 1;
        self.row_mut(a).insert(b.to_string(), distance);
        self.row_mut(b).insert(a.to_string(), distance);
    }

    fn row_mut(&mut self, label: &str) -> &mut RowDistances {
        self.rows.entry(label.to_string()).or_default()
    }

    /// Number of edge lines ingested, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of labels with at least one recorded distance
    pub fn label_count(&self) -> usize {
        self.rows.len()
    }
}

impl DistanceStore for MemoryStore {
    fn row(&self, label: &str) -> Result<Cow<'_, RowDistances>> {
        Ok(match self.rows.get(label) {
            Some(row) => Cow::Borrowed(row),
            None => Cow::Owned(RowDistances::new()),
        })
    }

    fn distance(&self, a: &str, b: &str) -> Result<Option<f64>> {
        Ok(self.rows.get(a).and_then(|row| row.get(b)).copied())
    }

    fn strategy(&self) -> StoreStrategy {
        StoreStrategy::InMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_with(contents: &str) -> (TempDir, InputSource) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairs.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, InputSource::new(path))
    }

    #[test]
    fn test_insert_is_symmetric() {
        let mut store = MemoryStore::new();
        store.insert("A", "B", 0.5);

        assert_eq!(store.distance("A", "B").unwrap(), Some(0.5));
        assert_eq!(store.distance("B", "A").unwrap(), Some(0.5));
        assert_eq!(store.distance("A", "C").unwrap(), None);
        assert_eq!(store.distance("C", "A").unwrap(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let (_dir, source) = source_with("A B 0.1\nB C 0.2\nA B 0.9\n");
        let store = MemoryStore::load(&source).unwrap();

        assert_eq!(store.distance("A", "B").unwrap(), Some(0.9));
        assert_eq!(store.distance("B", "A").unwrap(), Some(0.9));
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_reverse_duplicate_overwrites_both_directions() {
        let (_dir, source) = source_with("A B 0.1\nB A 0.7\n");
        let store = MemoryStore::load(&source).unwrap();

        assert_eq!(store.distance("A", "B").unwrap(), Some(0.7));
        assert_eq!(store.distance("B", "A").unwrap(), Some(0.7));
    }

    #[test]
    fn test_missing_distance_is_fatal() {
        let (_dir, source) = source_with("A B 0.5\nX Y\n");
        let err = MemoryStore::load(&source).unwrap_err();

        assert!(err.is_format());
        let message = err.to_string();
        assert!(message.contains(":2:"), "{}", message);
        assert!(message.contains("'X Y'"), "{}", message);
    }

    #[test]
    fn test_non_numeric_distance_is_fatal() {
        let (_dir, source) = source_with("A B far\n");
        let err = MemoryStore::load(&source).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("'far'"));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let (_dir, source) = source_with("\nA B 0.5\n   \n");
        let store = MemoryStore::load(&source).unwrap();
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.label_count(), 2);
    }

    #[test]
    fn test_row_for_unknown_label_is_empty() {
        let store = MemoryStore::new();
        assert!(store.row("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_row_borrows_existing_table() {
        let mut store = MemoryStore::new();
        store.insert("A", "B", 0.5);
        store.insert("A", "C", 0.3);

        let row = store.row("A").unwrap();
        assert!(matches!(row, Cow::Borrowed(_)));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("C"), Some(&0.3));
    }
}
