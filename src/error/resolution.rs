use std::path::PathBuf;
use thiserror::Error;

/// The root of a pass is unusable. Fatal to the whole pass.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("root location does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("root location is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("no units registered under namespace '{prefix}'")]
    EmptyNamespace { prefix: String },

    #[error("invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to read root location {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl ResolutionError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    pub fn root_not_directory(path: impl Into<PathBuf>) -> Self {
        Self::RootNotDirectory { path: path.into() }
    }

    pub fn empty_namespace(prefix: impl Into<String>) -> Self {
        Self::EmptyNamespace {
            prefix: prefix.into(),
        }
    }
}
