//! Convert sparse `label label distance` lists into dense, labeled,
//! gzip-compressed square distance matrices.

pub mod cli;
pub mod core;

pub use crate::core::{
    converter::{ConversionReport, Converter},
    labels::LabelIndex,
    mode::{select_strategy, StoreMode, StoreStrategy},
    store::{DistanceStore, DiskStore, MemoryStore},
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistwizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl DistwizError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DistwizError::Open {
            path: path.into(),
            source,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, DistwizError::Io(_) | DistwizError::Open { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, DistwizError::Format(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, DistwizError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, DistwizError>;
