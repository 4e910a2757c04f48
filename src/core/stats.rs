//! Single-pass profile of a sparse distance file
use crate::core::record::{self, RecordError};
use crate::core::source::InputSource;
use crate::Result;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct InputStats {
    pub total_lines: usize,
    pub blank_lines: usize,
    /// Lines with exactly two fields (labels but no distance)
    pub label_only_lines: usize,
    pub valid_edges: usize,
    /// Lines with neither 2 nor 3 fields
    pub malformed_lines: usize,
    pub invalid_distances: usize,
    pub self_pairs: usize,
    pub unique_labels: usize,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    /// First line that would abort an in-memory load
    pub first_strict_error: Option<usize>,
}

impl InputStats {
    /// Profile the input. Never fails on content, only on I/O.
    pub fn collect(source: &InputSource) -> Result<Self> {
        let mut stats = InputStats::default();
        let mut labels = BTreeSet::new();

        source.for_each_line(|line_number, line| {
            stats.total_lines += 1;

            if let Some((a, b)) = record::label_pair(line) {
                if !labels.contains(a) {
                    labels.insert(a.to_string());
                }
                if !labels.contains(b) {
                    labels.insert(b.to_string());
                }
            }

            match record::parse_edge(line) {
                Ok(None) => stats.blank_lines += 1,
                Ok(Some(edge)) => stats.record_edge(edge.source == edge.target, edge.distance),
                Err(err) => {
                    stats.first_strict_error.get_or_insert(line_number);
                    match err {
                        RecordError::FieldCount(2) => stats.label_only_lines += 1,
                        RecordError::FieldCount(_) => stats.malformed_lines += 1,
                        RecordError::InvalidDistance(_) => stats.invalid_distances += 1,
                    }
                }
            }
            Ok(())
        })?;

        stats.unique_labels = labels.len();
        Ok(stats)
    }

    fn record_edge(&mut self, self_pair: bool, distance: f64) {
        self.valid_edges += 1;
        if self_pair {
            self.self_pairs += 1;
        }
        self.min_distance = Some(self.min_distance.map_or(distance, |m| m.min(distance)));
        self.max_distance = Some(self.max_distance.map_or(distance, |m| m.max(distance)));
    }

    /// Whether an in-memory load of this input would succeed
    pub fn is_strictly_valid(&self) -> bool {
        self.first_strict_error.is_none()
    }

    /// Fraction of off-diagonal cells backed by an input edge (upper bound;
    /// duplicates are counted once per line)
    pub fn density(&self) -> f64 {
        let n = self.unique_labels as f64;
        if n < 2.0 {
            return 0.0;
        }
        let pairs = n * (n - 1.0) / 2.0;
        ((self.valid_edges - self.self_pairs) as f64 / pairs).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stats_for(contents: &str) -> InputStats {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairs.txt");
        std::fs::write(&path, contents).unwrap();
        InputStats::collect(&InputSource::new(path)).unwrap()
    }

    #[test]
    fn test_clean_input() {
        let stats = stats_for("A B 0.5\nB C 0.2\n");
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.valid_edges, 2);
        assert_eq!(stats.unique_labels, 3);
        assert_eq!(stats.min_distance, Some(0.2));
        assert_eq!(stats.max_distance, Some(0.5));
        assert!(stats.is_strictly_valid());
        assert!((stats.density() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_every_line_category() {
        let stats = stats_for("A B 0.5\n\nX Y\nlonely\nA C nope\nA A 0.0\nA B 1 2\n");

        assert_eq!(stats.total_lines, 7);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.label_only_lines, 1);
        assert_eq!(stats.malformed_lines, 2);
        assert_eq!(stats.invalid_distances, 1);
        assert_eq!(stats.valid_edges, 2);
        assert_eq!(stats.self_pairs, 1);
        assert_eq!(stats.unique_labels, 5);
        assert_eq!(stats.first_strict_error, Some(3));
        assert!(!stats.is_strictly_valid());
    }

    #[test]
    fn test_empty_input() {
        let stats = stats_for("");
        assert_eq!(stats, InputStats::default());
        assert_eq!(stats.density(), 0.0);
    }
}
