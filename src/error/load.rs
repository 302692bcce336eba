use std::path::PathBuf;
use thiserror::Error;

/// A candidate could not be turned into a usable symbol.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load library '{path}': {source}")]
    Library {
        path: PathBuf,
        source: libloading::Error,
    },

    #[error("library '{path}' does not export a step provider declaration: {source}")]
    MissingDeclaration {
        path: PathBuf,
        source: libloading::Error,
    },

    #[error("library '{path}' was built against provider ABI {found}, expected {expected}")]
    IncompatibleAbi {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("library '{path}' was built against stepscan {found}, expected {expected}")]
    IncompatibleVersion {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("no unit registered under name '{name}'")]
    UnknownName { name: String },

    #[error("loader cannot handle candidate '{candidate}'")]
    UnsupportedCandidate { candidate: String },

    #[error("'{candidate}' already failed to load in this pass")]
    PreviouslyFailed { candidate: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn unknown_name(name: impl Into<String>) -> Self {
        Self::UnknownName { name: name.into() }
    }

    pub fn unsupported_candidate(candidate: impl Into<String>) -> Self {
        Self::UnsupportedCandidate {
            candidate: candidate.into(),
        }
    }

    pub fn previously_failed(candidate: impl Into<String>) -> Self {
        Self::PreviouslyFailed {
            candidate: candidate.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
