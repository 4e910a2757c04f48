//! Row-by-row writer for the dense, tab-separated matrix
use crate::core::labels::LabelIndex;
use crate::core::store::{DistanceStore, RowDistances};
use crate::Result;
use std::fmt::Write as _;
use std::io::Write;

/// Value of every `(label, label)` cell
pub const DIAGONAL_VALUE: f64 = 0.0;

/// Value of every off-diagonal pair missing from the input
pub const DEFAULT_FILL: f64 = 1.0;

/// Totals for one emitted matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub rows: usize,
    pub stored_values: usize,
    pub filled_values: usize,
}

pub struct MatrixEmitter<W: Write> {
    writer: W,
    line: String,
    on_row: Option<Box<dyn FnMut(usize, &str)>>,
}

impl<W: Write> MatrixEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: String::new(),
            on_row: None,
        }
    }

    /// Called after each data row is written, with the number of rows
    /// written so far and the row label
    pub fn with_row_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, &str) + 'static,
    {
        self.on_row = Some(Box::new(callback));
        self
    }

    /// Header row: every label, tab-joined
    pub fn write_header(&mut self, index: &LabelIndex) -> Result<()> {
        self.line.clear();
        for (i, label) in index.iter().enumerate() {
            if i > 0 {
                self.line.push('\t');
            }
            self.line.push_str(label);
        }
        self.line.push('\n');
        self.writer.write_all(self.line.as_bytes())?;
        Ok(())
    }

    /// One data row for `row_label` across every column of `index`.
    ///
    /// Returns `(stored, filled)` value counts.
    pub fn write_row(
        &mut self,
        index: &LabelIndex,
        row_label: &str,
        distances: &RowDistances,
    ) -> Result<(usize, usize)> {
        let mut stored = 0;
        let mut filled = 0;

        self.line.clear();
        for (i, column) in index.iter().enumerate() {
            if i > 0 {
                self.line.push('\t');
            }
            let value = if column == row_label {
                DIAGONAL_VALUE
            } else if let Some(&d) = distances.get(column) {
                stored += 1;
                d
            } else {
                filled += 1;
                DEFAULT_FILL
            };
            // Writing into a String cannot fail
            let _ = write!(self.line, "{:.1}", value);
        }
        self.line.push('\n');
        self.writer.write_all(self.line.as_bytes())?;

        Ok((stored, filled))
    }

    /// Header plus one row per label, in index order
    pub fn emit(&mut self, index: &LabelIndex, store: &dyn DistanceStore) -> Result<EmitSummary> {
        let mut summary = EmitSummary::default();
        self.write_header(index)?;

        for label in index.iter() {
            let distances = store.row(label)?;
            let (stored, filled) = self.write_row(index, label, &distances)?;

            summary.rows += 1;
            summary.stored_values += stored;
            summary.filled_values += filled;

            if let Some(callback) = self.on_row.as_mut() {
                callback(summary.rows, label);
            }
        }

        Ok(summary)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
