//! Tokenizing of `label1 label2 distance` input lines
//!
//! Two levels of strictness are exposed: label discovery only needs the
//! first two fields, while distance ingest needs exactly three fields with a
//! finite numeric distance.
use std::fmt;

/// One pairwise distance as read from a single input line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub distance: f64,
}

impl<'a> Edge<'a> {
    /// Whether `label` is one of the two endpoints
    pub fn touches(&self, label: &str) -> bool {
        self.source == label || self.target == label
    }

    /// The endpoint opposite to `label`, if `label` is on this edge
    pub fn opposite(&self, label: &str) -> Option<&'a str> {
        if self.source == label {
            Some(self.target)
        } else if self.target == label {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Why a line could not be turned into an [`Edge`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    FieldCount(usize),
    InvalidDistance(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::FieldCount(n) => write!(f, "expected 3 fields, found {}", n),
            RecordError::InvalidDistance(text) => {
                write!(f, "distance '{}' is not a finite number", text)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Whether the line carries no fields at all
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// First two fields of a line, or `None` when there are fewer than two
pub fn label_pair(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    }
}

/// Strictly parse a line into an edge.
///
/// Blank lines yield `Ok(None)`. Anything else must be exactly three
/// fields whose last one parses as a finite `f64`.
pub fn parse_edge(line: &str) -> Result<Option<Edge<'_>>, RecordError> {
    let mut fields = line.split_whitespace();
    let (source, target, raw) = match (fields.next(), fields.next(), fields.next()) {
        (None, _, _) => return Ok(None),
        (Some(a), Some(b), Some(c)) => (a, b, c),
        (Some(_), None, _) => return Err(RecordError::FieldCount(1)),
        (Some(_), Some(_), None) => return Err(RecordError::FieldCount(2)),
    };

    let extra = fields.count();
    if extra > 0 {
        return Err(RecordError::FieldCount(3 + extra));
    }

    let distance = parse_distance(raw)?;
    Ok(Some(Edge {
        source,
        target,
        distance,
    }))
}

fn parse_distance(raw: &str) -> Result<f64, RecordError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::InvalidDistance(raw.to_string())),
    }
}
