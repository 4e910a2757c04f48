//! Discovery of the label universe that defines matrix row/column order
use crate::core::record;
use crate::core::source::InputSource;
use crate::Result;
use std::collections::BTreeSet;

/// Counters from a label discovery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub lines: usize,
    pub labeled_lines: usize,
    pub skipped_lines: usize,
}

/// Sorted, de-duplicated labels.
///
/// Order is byte-wise lexicographic and fixed at construction; there is
/// no way to add labels afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    labels: Vec<String>,
}

impl LabelIndex {
    /// Build from an arbitrary collection of labels (duplicates collapse)
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self {
            labels: set.into_iter().collect(),
        }
    }

    /// Scan the input once and collect the first two fields of every line.
    ///
    /// Lenient: lines with fewer than two fields are skipped, and the
    /// distance field is never looked at.
    pub fn scan(source: &InputSource) -> Result<Self> {
        Self::scan_with_summary(source).map(|(index, _)| index)
    }

    pub fn scan_with_summary(source: &InputSource) -> Result<(Self, ScanSummary)> {
        let mut set = BTreeSet::new();
        let mut summary = ScanSummary::default();

        source.for_each_line(|_, line| {
            summary.lines += 1;
            match record::label_pair(line) {
                Some((a, b)) => {
                    summary.labeled_lines += 1;
                    if !set.contains(a) {
                        set.insert(a.to_string());
                    }
                    if !set.contains(b) {
                        set.insert(b.to_string());
                    }
                }
                None => summary.skipped_lines += 1,
            }
            Ok(())
        })?;

        tracing::debug!(
            "Label scan of {}: {} lines, {} skipped, {} unique labels",
            source.path().display(),
            summary.lines,
            summary.skipped_lines,
            set.len()
        );

        Ok((
            Self {
                labels: set.into_iter().collect(),
            },
            summary,
        ))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Row/column position of `label`
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn source_with(contents: &str) -> (TempDir, InputSource) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairs.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, InputSource::new(path))
    }

    #[test]
    fn test_scan_sorts_and_dedups() {
        let (_dir, source) = source_with("C A 0.1\nB A 0.2\nA C 0.3\n");
        let index = LabelIndex::scan(&source).unwrap();
        assert_eq!(index.as_slice(), &["A", "B", "C"]);
    }

    #[test]
    fn test_scan_is_lenient() {
        let (_dir, source) = source_with("X Y\nlonely\n\nA B 0.5 trailing junk\n");
        let (index, summary) = LabelIndex::scan_with_summary(&source).unwrap();

        assert_eq!(index.as_slice(), &["A", "B", "X", "Y"]);
        assert_eq!(
            summary,
            ScanSummary {
                lines: 4,
                labeled_lines: 2,
                skipped_lines: 2,
            }
        );
    }

    #[test]
    fn test_scan_empty_input() {
        let (_dir, source) = source_with("");
        let index = LabelIndex::scan(&source).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_byte_order_sorting() {
        let index = LabelIndex::from_labels(["b", "B", "a", "A", "10", "9"]);
        assert_eq!(index.as_slice(), &["10", "9", "A", "B", "a", "b"]);
    }

    #[test]
    fn test_position_and_contains() {
        let index = LabelIndex::from_labels(["gamma", "alpha", "beta"]);
        assert_eq!(index.position("alpha"), Some(0));
        assert_eq!(index.position("gamma"), Some(2));
        assert_eq!(index.position("delta"), None);
        assert!(index.contains("beta"));
        assert!(!index.contains("delta"));
    }

    #[test]
    fn test_scan_missing_input() {
        let source = InputSource::new("/no/such/pairs.txt");
        assert!(LabelIndex::scan(&source).unwrap_err().is_io());
    }
}
