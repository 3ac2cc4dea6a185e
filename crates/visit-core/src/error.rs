//! Error Types for Visit Core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Visit store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Writing (or preparing to write) the backing file failed
    #[error("Storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Establishment list is empty")]
    EmptyEstablishments,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
