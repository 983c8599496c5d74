//! Error types for catalog loading and configuration
//!
//! None of these reach `resolve`; load errors are logged and recorded in
//! the load report, config errors surface only from the explicit
//! config-file constructors.

use std::path::{Path, PathBuf};

use crate::properties::PropertiesError;
use crate::registry::PatternSource;

pub type LoadResult<T> = Result<T, LoadError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure while merging one source file into the registry
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {source_kind} file {}: {error}", .path.display())]
    Io {
        source_kind: PatternSource,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid {source_kind} file {}: {error}", .path.display())]
    Syntax {
        source_kind: PatternSource,
        path: PathBuf,
        #[source]
        error: PropertiesError,
    },

    #[error("Invalid HTTP status '{value}' for code '{code}' in {}", .path.display())]
    InvalidStatus {
        path: PathBuf,
        code: String,
        value: String,
    },
}

impl LoadError {
    pub fn source_kind(&self) -> PatternSource {
        match self {
            LoadError::Io { source_kind, .. } | LoadError::Syntax { source_kind, .. } => {
                *source_kind
            }
            LoadError::InvalidStatus { .. } => PatternSource::HttpStatus,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Syntax { path, .. }
            | LoadError::InvalidStatus { path, .. } => path,
        }
    }
}

/// Failure while reading catalog configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid TOML in {origin}: {error}")]
    Toml {
        origin: String,
        #[source]
        error: toml::de::Error,
    },
}
