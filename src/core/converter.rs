//! Sparse-to-dense conversion pipeline

use crate::core::{
    config::ConvertSettings,
    emitter::{EmitSummary, MatrixEmitter},
    labels::LabelIndex,
    memory_estimator::MemoryEstimator,
    mode::{select_strategy, StoreStrategy},
    sink::CompressedSink,
    source::InputSource,
    store::open_store,
};
use crate::Result;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Rough expansion factor of gzip-compressed text input
const GZIP_TEXT_RATIO: u64 = 4;

/// Outcome of a completed conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub labels: usize,
    pub strategy: StoreStrategy,
    pub emitted: EmitSummary,
    pub output_bytes: u64,
    pub elapsed: Duration,
}

pub struct Converter {
    settings: ConvertSettings,
    silent: bool,
}

impl Converter {
    pub fn new(settings: ConvertSettings) -> Self {
        Self {
            settings,
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Scan labels, pick a store, then write header and rows to the
    /// compressed output.
    ///
    /// The output file is only created once the store is ready, so a
    /// strict parse failure in the in-memory path leaves no file behind.
    /// A failure while writing rows leaves a truncated file.
    pub fn run(&self) -> Result<ConversionReport> {
        let started = Instant::now();
        self.settings.validate()?;

        let source = InputSource::new(&self.settings.input);
        let labels = LabelIndex::scan(&source)?;

        let strategy = select_strategy(labels.len(), self.settings.threshold, self.settings.mode);
        tracing::info!(
            "Found {} labels in {}; using {} store (mode {}, threshold {})",
            labels.len(),
            source.path().display(),
            strategy,
            self.settings.mode,
            self.settings.threshold
        );

        if strategy == StoreStrategy::InMemory {
            self.check_memory(&source, &labels);
        }

        let store = open_store(strategy, &source)?;

        let mut sink = CompressedSink::create(&self.settings.output, self.settings.compression_level)?;
        let progress = self.progress_bar(labels.len() as u64, strategy);

        let emitted = {
            let row_progress = progress.clone();
            let mut emitter = MatrixEmitter::new(&mut sink)
                .with_row_callback(move |rows, _| row_progress.set_position(rows as u64));
            emitter.emit(&labels, store.as_ref())?
        };
        progress.finish_and_clear();

        let output_bytes = sink.finish()?;
        let elapsed = started.elapsed();

        tracing::info!(
            "Wrote {}x{} matrix to {} ({}) in {:.2?}",
            emitted.rows,
            emitted.rows,
            self.settings.output.display(),
            format_size(output_bytes, BINARY),
            elapsed
        );
        tracing::debug!(
            "{} stored values, {} default-filled",
            emitted.stored_values,
            emitted.filled_values
        );

        Ok(ConversionReport {
            labels: labels.len(),
            strategy,
            emitted,
            output_bytes,
            elapsed,
        })
    }

    /// Warn when the in-memory store looks too large; never changes the strategy
    fn check_memory(&self, source: &InputSource, labels: &LabelIndex) {
        let Ok(mut input_bytes) = source.len_on_disk() else {
            return;
        };
        if source.is_gzipped() {
            input_bytes *= GZIP_TEXT_RATIO;
        }

        let estimator = MemoryEstimator::new();
        let estimate = estimator.estimate_from_input_size(input_bytes, labels.len());
        if !estimator.fits_in_memory(estimate) {
            tracing::warn!(
                "In-memory store may need ~{} but only {} is usable; consider --mode disk",
                format_size(estimate, BINARY),
                format_size(estimator.usable_memory(), BINARY)
            );
        } else {
            tracing::debug!("Estimated in-memory store size: {}", format_size(estimate, BINARY));
        }
    }

    fn progress_bar(&self, rows: u64, strategy: StoreStrategy) -> ProgressBar {
        if self.silent {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(rows);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(strategy.to_string());
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::StoreMode;
    use flate2::read::GzDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;

    fn read_gz(path: &std::path::Path) -> String {
        let mut text = String::new();
        GzDecoder::new(std::fs::File::open(path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    fn convert(contents: &str, mode: StoreMode) -> (TempDir, Result<ConversionReport>) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("pairs.txt");
        std::fs::write(&input, contents).unwrap();

        let settings =
            ConvertSettings::new(&input, dir.path().join("matrix.tsv.gz")).with_mode(mode);
        let result = Converter::new(settings).with_silent(true).run();
        (dir, result)
    }

    #[test]
    fn test_run_in_memory() {
        let (dir, result) = convert("A B 0.5\nB C 0.2\n", StoreMode::Mem);
        let report = result.unwrap();

        assert_eq!(report.labels, 3);
        assert_eq!(report.strategy, StoreStrategy::InMemory);
        assert_eq!(report.emitted.rows, 3);
        assert_eq!(
            read_gz(&dir.path().join("matrix.tsv.gz")),
            "A\tB\tC\n0.0\t0.5\t1.0\n0.5\t0.0\t0.2\n1.0\t0.2\t0.0\n"
        );
    }

    #[test]
    fn test_run_disk_scan() {
        let (dir, result) = convert("A B 0.5\nB C 0.2\n", StoreMode::Disk);
        assert_eq!(result.unwrap().strategy, StoreStrategy::DiskScan);
        assert_eq!(
            read_gz(&dir.path().join("matrix.tsv.gz")),
            "A\tB\tC\n0.0\t0.5\t1.0\n0.5\t0.0\t0.2\n1.0\t0.2\t0.0\n"
        );
    }

    #[test]
    fn test_strict_failure_creates_no_output() {
        let (dir, result) = convert("A B 0.5\nX Y\n", StoreMode::Mem);
        assert!(result.unwrap_err().is_format());
        assert!(!dir.path().join("matrix.tsv.gz").exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let settings = ConvertSettings::new(dir.path().join("absent.txt"), dir.path().join("out.gz"));
        let err = Converter::new(settings).with_silent(true).run().unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_invalid_utf8_fails_in_every_mode() {
        for mode in [StoreMode::Mem, StoreMode::Disk] {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("pairs.txt");
            std::fs::write(&input, b"A B 0.5\nB \xff\xfe 0.2\n").unwrap();

            let settings =
                ConvertSettings::new(&input, dir.path().join("matrix.tsv.gz")).with_mode(mode);
            let err = Converter::new(settings).with_silent(true).run().unwrap_err();
            assert!(err.is_io(), "{:?}: {}", mode, err);
        }
    }

    #[test]
    fn test_output_aliasing_input_leaves_input_intact() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let input = dir.path().join("pairs.txt");
        std::fs::write(&input, "A B 0.5\nB C 0.2\n").unwrap();

        let output = dir.path().join("sub").join("..").join("pairs.txt");
        let settings = ConvertSettings::new(&input, output).with_mode(StoreMode::Disk);
        let err = Converter::new(settings).with_silent(true).run().unwrap_err();

        assert!(err.is_config());
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "A B 0.5\nB C 0.2\n");
    }
}
