//! Choice between the in-memory and disk-scanning distance stores
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label count above which `auto` switches to disk scanning
pub const DEFAULT_THRESHOLD: usize = 10_000;

/// Operator-requested store mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    #[default]
    Auto,
    Mem,
    Disk,
}

impl std::str::FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StoreMode::Auto),
            "mem" | "memory" | "in-memory" => Ok(StoreMode::Mem),
            "disk" | "disk-scan" => Ok(StoreMode::Disk),
            _ => Err(format!(
                "Unknown mode: '{}'. Options: auto, mem, disk",
                s
            )),
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreMode::Auto => "auto",
            StoreMode::Mem => "mem",
            StoreMode::Disk => "disk",
        };
        f.write_str(name)
    }
}

/// Concrete store implementation chosen for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreStrategy {
    InMemory,
    DiskScan,
}

impl fmt::Display for StoreStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStrategy::InMemory => f.write_str("in-memory"),
            StoreStrategy::DiskScan => f.write_str("disk-scan"),
        }
    }
}

/// Pick the store implementation. `auto` keeps everything in memory up to
/// and including `threshold` labels.
pub fn select_strategy(label_count: usize, threshold: usize, mode: StoreMode) -> StoreStrategy {
    match mode {
        StoreMode::Mem => StoreStrategy::InMemory,
        StoreMode::Disk => StoreStrategy::DiskScan,
        StoreMode::Auto if label_count <= threshold => StoreStrategy::InMemory,
        StoreMode::Auto => StoreStrategy::DiskScan,
    }
}
