//! Memory estimation for the in-memory distance store
use sysinfo::System;

/// Rough model of how much RAM the in-memory store needs.
///
/// The figure is advisory: it is logged and shown by `stats`, but never
/// changes which store a run uses.
#[derive(Debug, Clone)]
pub struct MemoryEstimator {
    /// Available system memory in bytes
    pub available_memory: u64,

    /// Safety margin (fraction of memory to keep free)
    pub safety_margin: f64,

    /// Bytes per stored edge direction (key string + value + table slot)
    pub bytes_per_entry: usize,

    /// Fixed overhead per label (row table + key)
    pub bytes_per_label: usize,

    /// Average input bytes per line, used to turn a file size into a line count
    pub bytes_per_line: usize,
}

impl Default for MemoryEstimator {
    fn default() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        Self::with_available_memory(system.available_memory())
    }
}

impl MemoryEstimator {
    /// Create a new memory estimator with current system state
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with a fixed amount of available memory
    pub fn with_available_memory(available_memory: u64) -> Self {
        Self {
            available_memory,
            safety_margin: 0.3,  // Keep 30% free
            bytes_per_entry: 64, // String header + short label + f64 + hash slot
            bytes_per_label: 96, // Row HashMap + key
            bytes_per_line: 24,  // "seq_0001 seq_0002 0.123\n"
        }
    }

    /// Get usable memory after safety margin
    pub fn usable_memory(&self) -> u64 {
        (self.available_memory as f64 * (1.0 - self.safety_margin)) as u64
    }

    /// Estimate store size from an edge count (each edge is stored twice)
    pub fn estimate_store_memory(&self, edge_count: u64, label_count: usize) -> u64 {
        edge_count * 2 * self.bytes_per_entry as u64
            + (label_count * self.bytes_per_label) as u64
    }

    /// Estimate store size from the uncompressed input size
    pub fn estimate_from_input_size(&self, input_bytes: u64, label_count: usize) -> u64 {
        let lines = input_bytes / self.bytes_per_line.max(1) as u64;
        self.estimate_store_memory(lines, label_count)
    }

    /// Whether `estimate` fits in usable memory
    pub fn fits_in_memory(&self, estimate: u64) -> bool {
        estimate <= self.usable_memory()
    }
}
