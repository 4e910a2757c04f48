//! Configuration file and resolved run settings

use crate::core::mode::{StoreMode, DEFAULT_THRESHOLD};
use crate::core::sink::{CompressionLevel, DEFAULT_COMPRESSION_LEVEL};
use crate::{DistwizError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixConfig {
    #[serde(default)]
    pub mode: StoreMode,
    /// Label count above which `auto` switches to disk scanning
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

fn default_threshold() -> usize { DEFAULT_THRESHOLD }
fn default_compression_level() -> u32 { DEFAULT_COMPRESSION_LEVEL }

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::default(),
            threshold: default_threshold(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| DistwizError::open(path, e))?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        DistwizError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| DistwizError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Fully resolved settings for one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compression_level: CompressionLevel,
    pub mode: StoreMode,
    pub threshold: usize,
}

impl ConvertSettings {
    /// Settings with built-in defaults for everything but the paths
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            compression_level: CompressionLevel::default(),
            mode: StoreMode::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Layer a config file underneath explicit overrides.
    ///
    /// `None` overrides fall back to the config value.
    pub fn resolve(
        input: PathBuf,
        output: PathBuf,
        config: &Config,
        compression_level: Option<u32>,
        mode: Option<StoreMode>,
        threshold: Option<usize>,
    ) -> Result<Self> {
        let settings = Self {
            input,
            output,
            compression_level: CompressionLevel::new(
                compression_level.unwrap_or(config.output.compression_level),
            )?,
            mode: mode.unwrap_or(config.matrix.mode),
            threshold: threshold.unwrap_or(config.matrix.threshold),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_mode(mut self, mode: StoreMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    /// Reject settings that cannot produce a usable run. Nothing is created
    /// or truncated here.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(DistwizError::Config("Input path is required".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(DistwizError::Config("Output path is required".to_string()));
        }
        if self.input == self.output || same_file(&self.input, &self.output) {
            return Err(DistwizError::Config(format!(
                "Input and output must differ: {} refers to {}",
                self.output.display(),
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Whether `output` names the existing file `input` once `..`, `.` and
/// symlinks are resolved. The output itself need not exist yet.
fn same_file(input: &Path, output: &Path) -> bool {
    let Ok(input) = std::fs::canonicalize(input) else {
        return false;
    };
    if let Ok(output) = std::fs::canonicalize(output) {
        return input == output;
    }

    let Some(name) = output.file_name() else {
        return false;
    };
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::canonicalize(parent).is_ok_and(|parent| parent.join(name) == input)
}
