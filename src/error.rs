//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RangeParseError: A declared constraint is not a valid range (non-fatal)
//! - ReduceError: Range reduction hit an unsupported configuration
//! - ManifestError: Issues reading or writing package.json / package-lock.json
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Range reduction errors
    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

/// A constraint string that does not parse as a version range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    /// A comparator or version token could not be understood
    #[error("invalid range '{range}': '{token}' {message}")]
    Invalid {
        range: String,
        token: String,
        message: String,
    },

    /// Every branch of the range excludes all versions
    #[error("range '{range}' matches no versions")]
    Unsatisfiable { range: String },
}

/// Errors raised while reducing ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// Two ranges reached a shape the reducer does not resolve
    #[error("cannot reduce '{left}' with '{right}': {reason} (not implemented)")]
    Unimplemented {
        left: String,
        right: String,
        reason: String,
    },

    /// Reduction failed for a specific engine
    #[error("failed to compute the '{engine}' engine range: {source}")]
    Engine {
        engine: String,
        #[source]
        source: Box<ReduceError>,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Lockfile format that carries no per-package engines
    #[error("unsupported lockfile version {version} in {path}: expected 2 or 3")]
    UnsupportedLockfile { path: PathBuf, version: u64 },

    /// The engines field could not be rewritten
    #[error("failed to update engines in {path}: {message}")]
    UpdateError { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The engine filter left nothing to compute
    #[error("no engines selected: requested [{requested}], available [{available}]")]
    NoEnginesSelected {
        requested: String,
        available: String,
    },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

impl ReduceError {
    /// Creates a new Unimplemented error
    pub fn unimplemented(
        left: impl Into<String>,
        right: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReduceError::Unimplemented {
            left: left.into(),
            right: right.into(),
            reason: reason.into(),
        }
    }

    /// Attaches the engine name to a reduction failure
    pub fn for_engine(self, engine: impl Into<String>) -> Self {
        ReduceError::Engine {
            engine: engine.into(),
            source: Box::new(self),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UpdateError
    pub fn update_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::UpdateError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new NoEnginesSelected error
    pub fn no_engines_selected(requested: &[String], available: &[String]) -> Self {
        ConfigError::NoEnginesSelected {
            requested: requested.join(", "),
            available: available.join(", "),
        }
    }
}
