//! Re-openable handle on the sparse input file
use crate::{DistwizError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Location of the sparse input.
///
/// Holds no open handle: every scan opens the file afresh and releases it
/// when the scan returns.
#[derive(Debug, Clone)]
pub struct InputSource {
    path: PathBuf,
}

impl InputSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Input is gzip-compressed (by extension)
    pub fn is_gzipped(&self) -> bool {
        self.path.extension().and_then(|s| s.to_str()) == Some("gz")
    }

    /// Size on disk in bytes (compressed size for `.gz` inputs)
    pub fn len_on_disk(&self) -> Result<u64> {
        let metadata =
            std::fs::metadata(&self.path).map_err(|e| DistwizError::open(&self.path, e))?;
        Ok(metadata.len())
    }

    /// Open a fresh buffered reader positioned at the start of the input
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path).map_err(|e| DistwizError::open(&self.path, e))?;

        if self.is_gzipped() {
            let decoder = MultiGzDecoder::new(BufReader::new(file));
            Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, decoder)))
        } else {
            Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
        }
    }

    /// Visit every line with its 1-based line number.
    ///
    /// The line passed to `visit` has its terminator stripped. The first
    /// error returned by `visit` stops the scan and is propagated.
    pub fn for_each_line<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(usize, &str) -> Result<()>,
    {
        let mut reader = self.open()?;
        let mut buffer = String::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            let read = reader.read_line(&mut buffer).map_err(|e| {
                DistwizError::Io(io::Error::new(
                    e.kind(),
                    format!(
                        "failed to read {} after line {}: {}",
                        self.path.display(),
                        line_number,
                        e
                    ),
                ))
            })?;
            if read == 0 {
                break;
            }
            line_number += 1;
            visit(line_number, buffer.trim_end_matches(['\n', '\r']))?;
        }

        Ok(())
    }

    /// Build the error for a malformed line at `line_number`
    pub fn format_error(
        &self,
        line_number: usize,
        line: &str,
        reason: impl std::fmt::Display,
    ) -> DistwizError {
        DistwizError::Format(format!(
            "{}:{}: {} in line '{}'",
            self.path.display(),
            line_number,
            reason,
            line
        ))
    }
}
