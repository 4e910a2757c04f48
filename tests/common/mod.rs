//! Shared helpers for distwiz integration tests
//!
//! Inputs are written into a per-test temporary directory, and compressed
//! matrices are decoded back into text for assertions.
#![allow(dead_code)]

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding one input and its outputs
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        TestEnvironment {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Write `contents` to `name` and return its path
    pub fn write_input(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write input");
        path
    }

    /// Write raw bytes to `name` and return its path
    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write input");
        path
    }
}

/// Decompress a gzip file into a string
pub fn read_gz(path: &Path) -> String {
    let file = std::fs::File::open(path).expect("Failed to open output");
    let mut text = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut text)
        .expect("Output is not valid gzip text");
    text
}

/// Split a decoded matrix into its header and rows of cells
pub fn parse_matrix(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut lines = text.split_terminator('\n');
    let header = match lines.next() {
        Some("") | None => Vec::new(),
        Some(line) => line.split('\t').map(str::to_string).collect(),
    };
    let rows = lines
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();
    (header, rows)
}
