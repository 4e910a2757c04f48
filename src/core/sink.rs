//! Buffered gzip output for the emitted matrix
use crate::{DistwizError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 4;
const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Gzip level, restricted to 1..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    pub fn new(level: u32) -> Result<Self> {
        if (1..=9).contains(&level) {
            Ok(Self(level))
        } else {
            Err(DistwizError::Config(format!(
                "Compression level must be between 1 and 9, got {}",
                level
            )))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl TryFrom<u32> for CompressionLevel {
    type Error = DistwizError;

    fn try_from(level: u32) -> Result<Self> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for u32 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

/// Exclusively owned output file wrapped as file -> gzip -> buffer.
///
/// [`CompressedSink::finish`] must be called on success to write the gzip
/// trailer and surface any late write error. When dropped without
/// `finish`, whatever was buffered is still flushed on a best-effort basis.
pub struct CompressedSink {
    path: PathBuf,
    writer: BufWriter<GzEncoder<File>>,
}

impl CompressedSink {
    pub fn create<P: AsRef<Path>>(path: P, level: CompressionLevel) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| DistwizError::open(&path, e))?;
        let encoder = GzEncoder::new(file, Compression::new(level.get()));

        Ok(Self {
            path,
            writer: BufWriter::with_capacity(WRITE_BUFFER_SIZE, encoder),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffers, write the gzip trailer and sync the file.
    ///
    /// Returns the compressed size in bytes.
    pub fn finish(self) -> Result<u64> {
        let encoder = self
            .writer
            .into_inner()
            .map_err(|e| DistwizError::Io(e.into_error()))?;
        let file = encoder.finish()?;
        file.sync_all()?;
        Ok(file.metadata()?.len())
    }
}

impl Write for CompressedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
