use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid ignore pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{0}")]
    Custom(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures of the host task configuration store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read task file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse task file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Options for '{scope}' must be a table")]
    NotATable { scope: String },
    #[error("Failed to convert options for '{scope}': {source}")]
    Convert {
        scope: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Unknown log level '{0}'; expected one of ALL, TRACE, DEBUG, INFO, WARN, ERROR, FATAL, OFF"
    )]
    UnknownLevel(String),
    #[error("Failed to install logger: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Faults raised while resolving options. Missing or empty required options
/// are not faults; they are reported through the diagnostic channel instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("Option '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// The first required option that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequiredOptionError {
    #[error("Option '{0}' is required but was not set")]
    NotSet(&'static str),
    #[error("Option '{0}' did not match any files")]
    Empty(&'static str),
}

impl RequiredOptionError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotSet(field) | Self::Empty(field) => field,
        }
    }
}
