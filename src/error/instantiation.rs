use thiserror::Error;

/// A unit carrying the capability marker could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("'{name}' has no zero-argument constructor")]
    NoConstructor { name: String },

    #[error("constructor of '{name}' failed: {message}")]
    ConstructorFailed { name: String, message: String },

    #[error("constructor of '{name}' panicked: {message}")]
    ConstructorPanicked { name: String, message: String },
}

impl InstantiationError {
    pub fn no_constructor(name: impl Into<String>) -> Self {
        Self::NoConstructor { name: name.into() }
    }

    pub fn constructor_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructorFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn constructor_panicked(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructorPanicked {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Qualified name of the unit that failed.
    pub fn unit_name(&self) -> &str {
        match self {
            Self::NoConstructor { name }
            | Self::ConstructorFailed { name, .. }
            | Self::ConstructorPanicked { name, .. } => name,
        }
    }
}
